//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - No filesystem or codec details leak through storage and processor traits
//! - Repositories are CRUD-focused; orchestration belongs in services

pub mod artwork_repository;
pub mod document_renderer;
pub mod image_processor;
pub mod image_repository;
pub mod media_storage;

use std::sync::Arc;
use thiserror::Error;

pub use artwork_repository::ArtworkRepository;
pub use document_renderer::{DocumentRenderer, OnePager};
pub use image_processor::{ImageProcessor, ProcessedImage};
pub use image_repository::ImageRepository;
pub use media_storage::{MediaStorage, StoredMedia};

use crate::domain::ValidationError;

/// Container for all repository trait objects.
///
/// Lives in core so that `AppCore` can accept it without depending on
/// `artcat-db`.
#[derive(Clone)]
pub struct Repos {
    pub artworks: Arc<dyn ArtworkRepository>,
    pub images: Arc<dyn ImageRepository>,
}

impl Repos {
    pub fn new(artworks: Arc<dyn ArtworkRepository>, images: Arc<dyn ImageRepository>) -> Self {
        Self { artworks, images }
    }
}

/// Infrastructure adapters that are not repositories.
#[derive(Clone)]
pub struct Media {
    pub storage: Arc<dyn MediaStorage>,
    pub processor: Arc<dyn ImageProcessor>,
    pub renderer: Arc<dyn DocumentRenderer>,
}

impl Media {
    pub fn new(
        storage: Arc<dyn MediaStorage>,
        processor: Arc<dyn ImageProcessor>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            storage,
            processor,
            renderer,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors from image decoding and media file storage.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The uploaded bytes are not a decodable image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A media file does not exist.
    #[error("Media file not found: {0}")]
    NotFound(String),

    /// A path escapes the media root or is otherwise unusable.
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    /// Filesystem failure.
    #[error("Media I/O error: {0}")]
    Io(String),
}

/// Errors from document rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The embedded image could not be decoded.
    #[error("Cannot embed image: {0}")]
    Image(String),

    /// Document assembly failed.
    #[error("Render failed: {0}")]
    Document(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters should map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Media operation failed.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Document rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<tokio::task::JoinError> for CoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {err}"))
    }
}
