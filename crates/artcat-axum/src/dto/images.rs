//! JSON image upload bodies.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use artcat_core::{ArtworkId, ImageUpload, NewArtwork, UploadOutcome};

use crate::error::HttpError;

/// One base64-encoded image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    pub data: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

impl ImagePayload {
    fn decode(&self, index: usize) -> Result<ImageUpload, HttpError> {
        let bytes = STANDARD
            .decode(self.data.trim())
            .map_err(|e| HttpError::BadRequest(format!("images[{index}].data: {e}")))?;
        Ok(ImageUpload {
            bytes,
            file_name: self.file_name.clone(),
            is_primary: self.is_primary,
        })
    }
}

fn decode_all(images: &[ImagePayload]) -> Result<Vec<ImageUpload>, HttpError> {
    images
        .iter()
        .enumerate()
        .map(|(index, image)| image.decode(index))
        .collect()
}

/// Body of `POST /api/artworks/{id}/images-json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesJsonRequest {
    pub images: Vec<ImagePayload>,
}

impl ImagesJsonRequest {
    /// Decode every payload. Invalid base64 rejects the whole body.
    pub fn uploads(&self) -> Result<Vec<ImageUpload>, HttpError> {
        if self.images.is_empty() {
            return Err(HttpError::BadRequest("images: at least one image is required".into()));
        }
        decode_all(&self.images)
    }
}

/// Body of `POST /api/artworks`: artwork fields plus optional images.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArtworkRequest {
    #[serde(flatten)]
    pub artwork: NewArtwork,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

impl CreateArtworkRequest {
    pub fn uploads(&self) -> Result<Vec<ImageUpload>, HttpError> {
        decode_all(&self.images)
    }
}

/// Per-image results of an upload batch.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub artwork_id: ArtworkId,
    pub stored: usize,
    pub failed: usize,
    pub results: Vec<UploadOutcome>,
}

impl UploadReport {
    pub fn new(artwork_id: ArtworkId, results: Vec<UploadOutcome>) -> Self {
        let stored = results.iter().filter(|r| r.is_ok()).count();
        Self {
            artwork_id,
            stored,
            failed: results.len() - stored,
            results,
        }
    }

    /// True when there was something to store and none of it was stored.
    pub fn all_failed(&self) -> bool {
        !self.results.is_empty() && self.stored == 0
    }
}
