//! Artwork domain types.
//!
//! These types represent catalog records independent of any storage
//! concerns. Identifier generation lives here too: the next identifier is
//! always computed from the identifiers that exist, never from a counter.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::ValidationError;

/// Prefix of generated artwork identifiers.
pub const ARTWORK_ID_PREFIX: char = 'A';

/// Zero-padding width of the numeric part of generated identifiers.
pub const ARTWORK_ID_WIDTH: usize = 4;

/// Maximum accepted length of a caller-supplied identifier.
pub const MAX_ARTWORK_ID_LEN: usize = 64;

// ─────────────────────────────────────────────────────────────────────────────
// Identifier
// ─────────────────────────────────────────────────────────────────────────────

/// Unique, immutable artwork identifier (e.g. `A0001`).
///
/// Identifiers double as media directory names, so the accepted alphabet is
/// restricted to ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtworkId(String);

impl ArtworkId {
    /// The identifier handed out on an empty catalog.
    pub fn first() -> Self {
        Self::from_sequence(1)
    }

    /// Format a sequence number as a generated identifier.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!(
            "{ARTWORK_ID_PREFIX}{sequence:0width$}",
            width = ARTWORK_ID_WIDTH
        ))
    }

    /// Validate a caller-supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("id", "identifier cannot be empty"));
        }
        if trimmed.len() > MAX_ARTWORK_ID_LEN {
            return Err(ValidationError::new(
                "id",
                format!("identifier longer than {MAX_ARTWORK_ID_LEN} characters"),
            ));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::new(
                "id",
                format!("'{trimmed}' may only contain letters, digits, '-' and '_'"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Numeric suffix of a generated-style identifier (`A` followed by digits).
    pub fn sequence(&self) -> Option<u64> {
        sequence_of(&self.0)
    }

    /// Compute the identifier that follows the highest existing sequence.
    ///
    /// Identifiers that do not follow the generated format are ignored.
    /// Returns [`ArtworkId::first`] when no generated identifier exists.
    pub fn next_after<'a, I>(existing: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        existing
            .into_iter()
            .filter_map(sequence_of)
            .max()
            .map_or_else(Self::first, |max| Self::from_sequence(max.saturating_add(1)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn sequence_of(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix(ARTWORK_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArtworkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ArtworkId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ArtworkId> for String {
    fn from(id: ArtworkId) -> Self {
        id.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Artwork Types
// ─────────────────────────────────────────────────────────────────────────────

/// A persisted artwork record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    /// Catalog identifier, assigned once and never changed.
    pub id: ArtworkId,
    pub title: String,
    /// Injected from configuration at creation time; never edited.
    pub artist: String,
    pub year: Option<i32>,
    pub medium: String,
    pub surface: String,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub depth_cm: Option<f64>,
    pub description: String,
    /// Normalized keyword set (trimmed, de-duplicated, sorted).
    pub keywords: BTreeSet<String>,
    /// URL-friendly slug derived from title and artist.
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Artwork {
    /// Build a record from creation fields.
    pub fn from_new(
        id: ArtworkId,
        fields: &NewArtwork,
        artist: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        let title = fields.title.trim().to_string();
        Self {
            slug: slugify(&title, artist),
            id,
            title,
            artist: artist.to_string(),
            year: fields.year,
            medium: fields.medium.trim().to_string(),
            surface: fields.surface.trim().to_string(),
            width_cm: fields.width_cm,
            height_cm: fields.height_cm,
            depth_cm: fields.depth_cm,
            description: fields.description.trim().to_string(),
            keywords: normalize_keywords(&fields.keywords),
            created_at,
        }
    }

    /// Apply a partial update. Fields left as `None` are untouched.
    pub fn apply(&mut self, update: &ArtworkUpdate) {
        if let Some(ref title) = update.title {
            self.title = title.trim().to_string();
            self.slug = slugify(&self.title, &self.artist);
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(ref medium) = update.medium {
            self.medium = medium.trim().to_string();
        }
        if let Some(ref surface) = update.surface {
            self.surface = surface.trim().to_string();
        }
        if let Some(width) = update.width_cm {
            self.width_cm = width;
        }
        if let Some(height) = update.height_cm {
            self.height_cm = height;
        }
        if let Some(depth) = update.depth_cm {
            self.depth_cm = depth;
        }
        if let Some(ref description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(ref keywords) = update.keywords {
            self.keywords = normalize_keywords(keywords);
        }
    }

    /// Check field-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_dimension("width_cm", self.width_cm)?;
        validate_dimension("height_cm", self.height_cm)?;
        validate_dimension("depth_cm", self.depth_cm)
    }

    /// Lowercased text that free-text search runs against.
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.description.len() + 32);
        text.push_str(&self.title);
        text.push('\n');
        text.push_str(&self.description);
        for keyword in &self.keywords {
            text.push('\n');
            text.push_str(keyword);
        }
        text.to_lowercase()
    }

    /// Human-readable size, e.g. `60 × 80 × 2`. Empty when nothing is known.
    pub fn size_label(&self) -> String {
        let parts: Vec<String> = [self.width_cm, self.height_cm, self.depth_cm]
            .into_iter()
            .flatten()
            .map(format_cm)
            .collect();
        parts.join(" × ")
    }

    /// Keywords joined for display.
    pub fn keywords_label(&self) -> String {
        self.keywords.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn format_cm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').to_string()
    }
}

/// Fields accepted when creating an artwork.
///
/// `id` is optional: a blank or absent identifier is generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewArtwork {
    pub id: Option<String>,
    pub title: String,
    pub year: Option<i32>,
    pub medium: String,
    pub surface: String,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub depth_cm: Option<f64>,
    pub description: String,
    pub keywords: Vec<String>,
}

impl NewArtwork {
    /// Create with a title and everything else empty.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// The caller-supplied identifier, if one was given and is not blank.
    pub fn requested_id(&self) -> Result<Option<ArtworkId>, ValidationError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => ArtworkId::parse(raw).map(Some),
        }
    }
}

/// Partial artwork update.
///
/// Clearable fields use `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = clear the field
/// - `Some(Some(value))` = set the field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkUpdate {
    pub title: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub year: Option<Option<i32>>,
    pub medium: Option<String>,
    pub surface: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub width_cm: Option<Option<f64>>,
    #[serde(deserialize_with = "double_option")]
    pub height_cm: Option<Option<f64>>,
    #[serde(deserialize_with = "double_option")]
    pub depth_cm: Option<Option<f64>>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
}

/// Distinguish an explicit `null` (clear) from an absent field (keep).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ─────────────────────────────────────────────────────────────────────────────
// Normalization helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Trim, drop empty entries and de-duplicate keywords.
pub fn normalize_keywords<S: AsRef<str>>(raw: &[S]) -> BTreeSet<String> {
    raw.iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a comma-separated keyword string as typed into a form.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build a lowercase ASCII slug from `title-artist`.
pub fn slugify(title: &str, artist: &str) -> String {
    let mut slug = String::with_capacity(title.len() + artist.len() + 1);
    let mut pending_dash = false;
    for c in title.chars().chain(std::iter::once('-')).chain(artist.chars()) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", "title is required"));
    }
    Ok(())
}

fn validate_dimension(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ValidationError::new(
            field,
            format!("must be a non-negative number, got {v}"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Artwork {
        let fields = NewArtwork {
            title: "  Harbour at Dusk ".to_string(),
            year: Some(2021),
            medium: "Oil".to_string(),
            width_cm: Some(60.0),
            height_cm: Some(80.0),
            keywords: vec!["sea".into(), " boats".into(), "sea".into(), String::new()],
            ..NewArtwork::default()
        };
        Artwork::from_new(ArtworkId::first(), &fields, "Jane Doe", Utc::now())
    }

    #[test]
    fn test_first_id_is_padded() {
        assert_eq!(ArtworkId::first().as_str(), "A0001");
        assert_eq!(ArtworkId::from_sequence(42).as_str(), "A0042");
        assert_eq!(ArtworkId::from_sequence(12345).as_str(), "A12345");
    }

    #[test]
    fn test_next_after_uses_max_not_count() {
        let next = ArtworkId::next_after(["A0001", "A0007", "A0003"]);
        assert_eq!(next.as_str(), "A0008");
    }

    #[test]
    fn test_next_after_ignores_foreign_ids() {
        let next = ArtworkId::next_after(["custom-1", "A12b", "B0099", "A", "A0002"]);
        assert_eq!(next.as_str(), "A0003");
        assert_eq!(ArtworkId::next_after(Vec::<&str>::new()), ArtworkId::first());
    }

    #[test]
    fn test_parse_rejects_path_like_ids() {
        assert!(ArtworkId::parse("../etc").is_err());
        assert!(ArtworkId::parse("   ").is_err());
        assert!(ArtworkId::parse(&"x".repeat(65)).is_err());
        assert_eq!(ArtworkId::parse(" P-12_b ").unwrap().as_str(), "P-12_b");
    }

    #[test]
    fn test_requested_id_blank_means_generate() {
        let mut fields = NewArtwork::titled("Untitled");
        assert_eq!(fields.requested_id().unwrap(), None);
        fields.id = Some("  ".into());
        assert_eq!(fields.requested_id().unwrap(), None);
        fields.id = Some("A0100".into());
        assert_eq!(fields.requested_id().unwrap().unwrap().sequence(), Some(100));
    }

    #[test]
    fn test_from_new_normalizes_fields() {
        let artwork = sample();
        assert_eq!(artwork.title, "Harbour at Dusk");
        assert_eq!(artwork.slug, "harbour-at-dusk-jane-doe");
        assert_eq!(
            artwork.keywords.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["boats", "sea"]
        );
    }

    #[test]
    fn test_apply_partial_update() {
        let mut artwork = sample();
        let update = ArtworkUpdate {
            title: Some("Night Harbour".into()),
            width_cm: Some(None),
            ..ArtworkUpdate::default()
        };
        artwork.apply(&update);

        assert_eq!(artwork.title, "Night Harbour");
        assert_eq!(artwork.slug, "night-harbour-jane-doe");
        assert_eq!(artwork.width_cm, None);
        assert_eq!(artwork.height_cm, Some(80.0));
        assert_eq!(artwork.year, Some(2021));
        assert_eq!(artwork.medium, "Oil");
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let update: ArtworkUpdate = serde_json::from_str(r#"{"year": null}"#).unwrap();
        assert_eq!(update.year, Some(None));
        assert_eq!(update.width_cm, None);

        let update: ArtworkUpdate = serde_json::from_str(r#"{"year": 1999}"#).unwrap();
        assert_eq!(update.year, Some(Some(1999)));
    }

    #[test]
    fn test_validate_rejects_blank_title_and_negative_size() {
        let mut artwork = sample();
        artwork.title = " ".into();
        assert_eq!(artwork.validate().unwrap_err().field, "title");

        let mut artwork = sample();
        artwork.depth_cm = Some(-1.0);
        assert_eq!(artwork.validate().unwrap_err().field, "depth_cm");
    }

    #[test]
    fn test_search_text_covers_keywords() {
        let text = sample().search_text();
        assert!(text.contains("harbour at dusk"));
        assert!(text.contains("boats"));
    }

    #[test]
    fn test_labels() {
        let mut artwork = sample();
        assert_eq!(artwork.size_label(), "60 × 80");
        artwork.depth_cm = Some(2.5);
        assert_eq!(artwork.size_label(), "60 × 80 × 2.5");
        assert_eq!(artwork.keywords_label(), "boats, sea");
    }

    #[test]
    fn test_size_label_skips_missing_dimensions() {
        let mut artwork = sample();
        artwork.width_cm = None;
        artwork.depth_cm = Some(2.0);
        assert_eq!(artwork.size_label(), "80 × 2");

        artwork.height_cm = None;
        assert_eq!(artwork.size_label(), "2");

        artwork.depth_cm = None;
        assert_eq!(artwork.size_label(), "");
    }

    #[test]
    fn test_split_keywords() {
        assert_eq!(split_keywords(" a, ,b ,c"), vec!["a", "b", "c"]);
    }
}
