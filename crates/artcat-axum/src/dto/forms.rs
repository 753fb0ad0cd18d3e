//! HTML form fields for creating and editing artworks.

use std::collections::HashMap;

use serde::Deserialize;

use artcat_core::domain::split_keywords;
use artcat_core::{Artwork, ArtworkUpdate, NewArtwork};

use super::parse_optional;
use crate::error::HttpError;

/// Artwork form as posted by the browser. Every value is text; keywords
/// are a single comma-separated field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtworkForm {
    pub artwork_id: String,
    pub title: String,
    pub year: String,
    pub medium: String,
    pub surface: String,
    pub width_cm: String,
    pub height_cm: String,
    pub depth_cm: String,
    pub description: String,
    pub keywords: String,
}

impl ArtworkForm {
    /// Build from the text parts of a multipart body.
    pub fn from_fields(fields: &mut HashMap<String, String>) -> Self {
        let mut take = |name: &str| fields.remove(name).unwrap_or_default();
        Self {
            artwork_id: take("artwork_id"),
            title: take("title"),
            year: take("year"),
            medium: take("medium"),
            surface: take("surface"),
            width_cm: take("width_cm"),
            height_cm: take("height_cm"),
            depth_cm: take("depth_cm"),
            description: take("description"),
            keywords: take("keywords"),
        }
    }

    /// Prefill from a stored artwork.
    pub fn from_artwork(artwork: &Artwork) -> Self {
        let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            artwork_id: artwork.id.to_string(),
            title: artwork.title.clone(),
            year: artwork.year.map(|y| y.to_string()).unwrap_or_default(),
            medium: artwork.medium.clone(),
            surface: artwork.surface.clone(),
            width_cm: number(artwork.width_cm),
            height_cm: number(artwork.height_cm),
            depth_cm: number(artwork.depth_cm),
            description: artwork.description.clone(),
            keywords: artwork.keywords_label(),
        }
    }

    pub fn to_new_artwork(&self) -> Result<NewArtwork, HttpError> {
        Ok(NewArtwork {
            id: Some(self.artwork_id.clone()),
            title: self.title.clone(),
            year: parse_optional("year", Some(&self.year))?,
            medium: self.medium.trim().to_string(),
            surface: self.surface.trim().to_string(),
            width_cm: parse_optional("width_cm", Some(&self.width_cm))?,
            height_cm: parse_optional("height_cm", Some(&self.height_cm))?,
            depth_cm: parse_optional("depth_cm", Some(&self.depth_cm))?,
            description: self.description.trim().to_string(),
            keywords: split_keywords(&self.keywords),
        })
    }

    /// The edit form always posts every field, so each one is set; a blank
    /// optional field clears it.
    pub fn to_update(&self) -> Result<ArtworkUpdate, HttpError> {
        Ok(ArtworkUpdate {
            title: Some(self.title.clone()),
            year: Some(parse_optional("year", Some(&self.year))?),
            medium: Some(self.medium.trim().to_string()),
            surface: Some(self.surface.trim().to_string()),
            width_cm: Some(parse_optional("width_cm", Some(&self.width_cm))?),
            height_cm: Some(parse_optional("height_cm", Some(&self.height_cm))?),
            depth_cm: Some(parse_optional("depth_cm", Some(&self.depth_cm))?),
            description: Some(self.description.trim().to_string()),
            keywords: Some(split_keywords(&self.keywords)),
        })
    }
}
