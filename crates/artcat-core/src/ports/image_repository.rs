//! Image repository trait definition.

use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::{ArtworkId, DeletedImage, Image, NewImage};

/// Repository for image records.
///
/// Implementations keep the primary-image invariant: an artwork with at
/// least one image has exactly one primary. Every mutating method performs
/// its reads and writes in a single transaction.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Insert an image record.
    ///
    /// The image becomes primary if `wants_primary` is set or the artwork
    /// has no primary yet. Returns `Err(RepositoryError::NotFound)` if the
    /// artwork doesn't exist.
    async fn insert(&self, image: &NewImage) -> Result<Image, RepositoryError>;

    /// Get an image by identifier.
    async fn get(&self, id: Uuid) -> Result<Image, RepositoryError>;

    /// Images of one artwork, primary first, then in insertion order.
    async fn list_for_artwork(&self, artwork_id: &ArtworkId) -> Result<Vec<Image>, RepositoryError>;

    /// Primary images for a set of artworks. Artworks without images are absent.
    async fn primaries(&self, artwork_ids: &[ArtworkId]) -> Result<Vec<Image>, RepositoryError>;

    /// Every image record in the catalog.
    async fn list_all(&self) -> Result<Vec<Image>, RepositoryError>;

    /// Make an image the primary of its artwork, demoting the previous one.
    async fn set_primary(&self, id: Uuid) -> Result<Image, RepositoryError>;

    /// Delete an image record.
    ///
    /// When the deleted image was primary, the earliest remaining image of
    /// the same artwork is promoted.
    async fn delete(&self, id: Uuid) -> Result<DeletedImage, RepositoryError>;
}
