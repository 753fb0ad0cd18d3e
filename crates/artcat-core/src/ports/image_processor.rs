//! Image decoding and thumbnail port.

use super::MediaError;

/// What the processor learned about an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    /// Canonical file extension of the detected format.
    pub extension: String,
    pub width: u32,
    pub height: u32,
    /// Encoded thumbnail bytes.
    pub thumbnail: Vec<u8>,
}

/// Decodes uploads and produces thumbnails.
///
/// Synchronous and CPU-bound; callers run it on a blocking thread.
pub trait ImageProcessor: Send + Sync {
    /// Decode `bytes`, returning `MediaError::InvalidImage` if they are not
    /// a supported image.
    fn process(&self, bytes: &[u8]) -> Result<ProcessedImage, MediaError>;
}
