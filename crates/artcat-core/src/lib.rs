//! Core domain types, ports and services for the artcat catalog.
//!
//! This crate has no knowledge of SQLite, HTTP or the filesystem layout of
//! the media tree. Adapters implement the traits in [`ports`] and wire them
//! into an [`AppCore`].

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

pub use domain::{
    Artwork, ArtworkFilter, ArtworkId, ArtworkQuery, ArtworkSort, ArtworkUpdate, DeletedImage,
    Image, ImageUpload, NewArtwork, NewImage, Pagination, UploadOutcome, ValidationError,
};
pub use ports::{
    ArtworkRepository, CoreError, DocumentRenderer, ImageProcessor, ImageRepository, Media,
    MediaError, MediaStorage, OnePager, ProcessedImage, RenderError, Repos, RepositoryError,
    StoredMedia,
};
pub use services::{
    AppCore, ArtworkDetail, ArtworkPage, ArtworkService, CatalogService, CreatedArtwork,
    ImageService, ListedArtwork, ReconcileReport,
};
pub use settings::{CatalogSettings, SettingsError, validate_settings};
