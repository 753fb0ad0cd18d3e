//! Image domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ArtworkId;

/// A stored image belonging to exactly one artwork.
///
/// Paths are relative to the media root so the data directory can move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: Uuid,
    pub artwork_id: ArtworkId,
    pub original_path: String,
    pub thumb_path: String,
    /// Name of the uploaded file as supplied by the client.
    pub file_name: Option<String>,
    /// File extension of the stored original (`png`, `jpg`, ...).
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub is_primary: bool,
    /// Insertion order; used to pick a replacement primary.
    pub seq: i64,
    pub created_at: DateTime<Utc>,
}

/// Image record ready for insertion. Files are already on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub id: Uuid,
    pub artwork_id: ArtworkId,
    pub original_path: String,
    pub thumb_path: String,
    pub file_name: Option<String>,
    pub format: String,
    pub width: u32,
    pub height: u32,
    /// Caller asked for this image to become primary.
    pub wants_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// Raw upload as received from a client.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub is_primary: bool,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn named(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

/// Result of removing an image record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedImage {
    pub image: Image,
    /// Image promoted to primary because the removed one was primary.
    pub promoted: Option<Uuid>,
}

/// Outcome of one upload in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadOutcome {
    pub index: usize,
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn stored(index: usize, image: &Image) -> Self {
        Self {
            index,
            file_name: image.file_name.clone(),
            image_id: Some(image.id),
            error: None,
        }
    }

    pub fn failed(index: usize, file_name: Option<String>, error: impl ToString) -> Self {
        Self {
            index,
            file_name,
            image_id: None,
            error: Some(error.to_string()),
        }
    }

    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
