//! Media file storage port.

use async_trait::async_trait;
use uuid::Uuid;

use super::MediaError;
use crate::domain::ArtworkId;

/// Relative paths of the files written for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub original_path: String,
    pub thumb_path: String,
}

/// File storage for original images and thumbnails.
///
/// All paths crossing this boundary are relative to the media root and use
/// `/` as separator.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Write the original and its thumbnail. Either both files exist
    /// afterwards or neither does.
    async fn store(
        &self,
        artwork_id: &ArtworkId,
        image_id: Uuid,
        extension: &str,
        original: &[u8],
        thumbnail: &[u8],
    ) -> Result<StoredMedia, MediaError>;

    /// Read a stored file.
    async fn read(&self, relative: &str) -> Result<Vec<u8>, MediaError>;

    /// Whether a stored file exists.
    async fn exists(&self, relative: &str) -> Result<bool, MediaError>;

    /// Remove a stored file. Missing files are not an error.
    async fn remove(&self, relative: &str) -> Result<(), MediaError>;

    /// Remove an artwork's folders if they hold no files. Returns `false`
    /// when something is still stored there.
    async fn remove_artwork_dir(&self, artwork_id: &ArtworkId) -> Result<bool, MediaError>;

    /// Every regular file under the media root, excluding temp files.
    async fn list_files(&self) -> Result<Vec<String>, MediaError>;

    /// Delete leftover temp files from interrupted writes. Returns how many.
    async fn cleanup_temp_files(&self) -> Result<usize, MediaError>;

    /// Delete empty directories below the media root. Returns how many.
    async fn prune_empty_dirs(&self) -> Result<usize, MediaError>;
}
