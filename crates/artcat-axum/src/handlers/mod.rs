//! HTTP request handlers.
//!
//! `artworks` and `images` serve the JSON API, `pages` the HTML catalog and
//! `export` the PDF sheets. Handlers are thin wrappers over `AppCore`.

pub mod artworks;
pub mod export;
pub mod images;
pub mod pages;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use artcat_core::{ArtworkId, ArtworkService};

use crate::error::HttpError;

/// Artwork id from a path segment; anything malformed cannot exist.
pub(crate) fn artwork_id(raw: &str) -> Result<ArtworkId, HttpError> {
    Ok(ArtworkService::resolve_id(raw)?)
}

/// Image id from a path segment; anything malformed cannot exist.
pub(crate) fn image_id(raw: &str) -> Result<Uuid, HttpError> {
    Uuid::parse_str(raw.trim()).map_err(|_| HttpError::NotFound(format!("image {raw}")))
}

/// Unwrap a JSON body, reporting any rejection as a 400.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))
}
