//! Domain types for the artwork catalog.
//!
//! These types are pure data with no infrastructure dependencies. Storage
//! adapters map between them and their own row formats.

mod artwork;
mod filter;
mod image;

use thiserror::Error;

pub use artwork::{
    ARTWORK_ID_PREFIX, ARTWORK_ID_WIDTH, Artwork, ArtworkId, ArtworkUpdate, MAX_ARTWORK_ID_LEN,
    NewArtwork, normalize_keywords, slugify, split_keywords,
};
pub use filter::{ArtworkFilter, ArtworkQuery, ArtworkSort, Pagination};
pub use image::{DeletedImage, Image, ImageUpload, NewImage, UploadOutcome};

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
