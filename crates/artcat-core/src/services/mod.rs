//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports and domain logic. They don't know
//! about concrete implementations.

mod app_core;
mod artwork_service;
mod catalog_service;
mod image_service;

pub use app_core::AppCore;
pub use artwork_service::{ArtworkService, MAX_ID_ATTEMPTS};
pub use catalog_service::{ArtworkDetail, ArtworkPage, CatalogService, CreatedArtwork, ListedArtwork};
pub use image_service::{ImageService, MissingMedia, ReconcileReport};
