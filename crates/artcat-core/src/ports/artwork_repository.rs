//! Artwork repository trait definition.
//!
//! This port defines the interface for artwork persistence operations.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Artwork, ArtworkFilter, ArtworkId, ArtworkQuery};

/// Repository for artwork persistence operations.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Identifier generation and validation belong in `ArtworkService`
/// - `search` receives a normalized, satisfiable query
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtworkRepository: Send + Sync {
    /// All identifiers in the catalog, in no particular order.
    async fn list_ids(&self) -> Result<Vec<ArtworkId>, RepositoryError>;

    /// Get an artwork by identifier.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the artwork doesn't exist.
    async fn get(&self, id: &ArtworkId) -> Result<Artwork, RepositoryError>;

    /// Insert a fully-formed artwork.
    ///
    /// Returns `Err(RepositoryError::AlreadyExists)` if the identifier is taken.
    async fn insert(&self, artwork: &Artwork) -> Result<(), RepositoryError>;

    /// Overwrite the mutable fields of an existing artwork.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the artwork doesn't exist.
    async fn update(&self, artwork: &Artwork) -> Result<(), RepositoryError>;

    /// Delete an artwork. Image records are removed with it.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the artwork doesn't exist.
    async fn delete(&self, id: &ArtworkId) -> Result<(), RepositoryError>;

    /// Filtered, ordered, paginated list.
    async fn search(&self, query: &ArtworkQuery) -> Result<Vec<Artwork>, RepositoryError>;

    /// Number of artworks matching a filter, ignoring pagination.
    async fn count(&self, filter: &ArtworkFilter) -> Result<u64, RepositoryError>;
}
