//! Catalog settings and validation.
//!
//! Settings are assembled once at startup from defaults, environment and
//! command-line flags, then injected into the services. They are pure
//! domain types with no infrastructure dependencies.

use serde::{Deserialize, Serialize};

/// Artist name used when none is configured.
pub const DEFAULT_ARTIST_NAME: &str = "Unknown artist";

/// Default port for the web server.
pub const DEFAULT_PORT: u16 = 8000;

/// Default longest edge of generated thumbnails, in pixels.
pub const DEFAULT_THUMBNAIL_EDGE: u32 = 400;

/// Page size of the HTML catalog list when the request gives no limit.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Hard cap on the page size a client may ask for.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 500;

/// Catalog settings.
///
/// All fields are optional so that partial sources can be layered; use the
/// `effective_*` accessors to read values with defaults applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogSettings {
    /// Artist attributed to every artwork in this catalog.
    pub artist_name: Option<String>,

    /// Shared secret required in `X-API-Key` on the JSON API.
    pub api_key: Option<String>,

    /// Port for the web server.
    pub port: Option<u16>,

    /// Longest edge of generated thumbnails (64-2048).
    pub thumbnail_edge: Option<u32>,

    /// Page size of the HTML catalog list when the request gives none.
    pub default_page_size: Option<u32>,

    /// Largest page size a list request may ask for.
    pub max_page_size: Option<u32>,
}

impl CatalogSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            artist_name: Some(DEFAULT_ARTIST_NAME.to_string()),
            api_key: None,
            port: Some(DEFAULT_PORT),
            thumbnail_edge: Some(DEFAULT_THUMBNAIL_EDGE),
            default_page_size: Some(DEFAULT_PAGE_SIZE),
            max_page_size: Some(DEFAULT_MAX_PAGE_SIZE),
        }
    }

    #[must_use]
    pub fn effective_artist_name(&self) -> &str {
        self.artist_name.as_deref().unwrap_or(DEFAULT_ARTIST_NAME)
    }

    #[must_use]
    pub const fn effective_port(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None => DEFAULT_PORT,
        }
    }

    #[must_use]
    pub const fn effective_thumbnail_edge(&self) -> u32 {
        match self.thumbnail_edge {
            Some(edge) => edge,
            None => DEFAULT_THUMBNAIL_EDGE,
        }
    }

    #[must_use]
    pub const fn effective_default_page_size(&self) -> u32 {
        match self.default_page_size {
            Some(size) => size,
            None => DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub const fn effective_max_page_size(&self) -> u32 {
        match self.max_page_size {
            Some(size) => size,
            None => DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// The API key, treating a blank value as unset.
    #[must_use]
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Artist name cannot be empty")]
    EmptyArtistName,

    #[error("Thumbnail edge must be between 64 and 2048 pixels, got {0}")]
    InvalidThumbnailEdge(u32),

    #[error("Page size must be between 1 and {max}, got {size}")]
    InvalidPageSize { size: u32, max: u32 },

    #[error("Port cannot be 0")]
    InvalidPort,
}

/// Validate settings values.
pub fn validate_settings(settings: &CatalogSettings) -> Result<(), SettingsError> {
    if settings
        .artist_name
        .as_ref()
        .is_some_and(|a| a.trim().is_empty())
    {
        return Err(SettingsError::EmptyArtistName);
    }

    if settings.port == Some(0) {
        return Err(SettingsError::InvalidPort);
    }

    if let Some(edge) = settings.thumbnail_edge {
        if !(64..=2048).contains(&edge) {
            return Err(SettingsError::InvalidThumbnailEdge(edge));
        }
    }

    let max = settings.effective_max_page_size();
    if max == 0 {
        return Err(SettingsError::InvalidPageSize { size: 0, max: u32::MAX });
    }
    let size = settings.effective_default_page_size();
    if !(1..=max).contains(&size) {
        return Err(SettingsError::InvalidPageSize { size, max });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = CatalogSettings::with_defaults();
        assert_eq!(settings.effective_artist_name(), DEFAULT_ARTIST_NAME);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_empty_artist_rejected() {
        let settings = CatalogSettings {
            artist_name: Some("  ".to_string()),
            ..CatalogSettings::with_defaults()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptyArtistName)
        ));
    }

    #[test]
    fn test_thumbnail_edge_bounds() {
        let settings = CatalogSettings {
            thumbnail_edge: Some(10),
            ..CatalogSettings::with_defaults()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidThumbnailEdge(10))
        ));
    }

    #[test]
    fn test_default_page_size_must_fit_max() {
        let settings = CatalogSettings {
            default_page_size: Some(100),
            max_page_size: Some(20),
            ..CatalogSettings::with_defaults()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidPageSize { size: 100, max: 20 })
        ));
    }

    #[test]
    fn test_blank_api_key_disables_auth() {
        let settings = CatalogSettings {
            api_key: Some(" ".to_string()),
            ..CatalogSettings::default()
        };
        assert_eq!(settings.effective_api_key(), None);
    }
}
