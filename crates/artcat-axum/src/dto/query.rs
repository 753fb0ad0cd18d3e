//! List/search query string.

use serde::{Deserialize, Serialize};

use artcat_core::{ArtworkFilter, ArtworkQuery, ArtworkSort, Pagination};

use super::parse_optional;
use crate::error::HttpError;

/// Query parameters shared by `GET /` and `GET /api/artworks`.
///
/// `style` is accepted as an alias of `medium`, and `year_from`/`year_to`
/// as aliases of `year_min`/`year_max`. When both spellings are given the
/// canonical one wins.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListParams {
    pub q: Option<String>,
    pub artist: Option<String>,
    pub medium: Option<String>,
    pub style: Option<String>,
    pub year_min: Option<String>,
    pub year_from: Option<String>,
    pub year_max: Option<String>,
    pub year_to: Option<String>,
    pub width_min: Option<String>,
    pub width_max: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    fn year_min_raw(&self) -> Option<&str> {
        non_blank(self.year_min.as_deref()).or_else(|| non_blank(self.year_from.as_deref()))
    }

    fn year_max_raw(&self) -> Option<&str> {
        non_blank(self.year_max.as_deref()).or_else(|| non_blank(self.year_to.as_deref()))
    }

    /// Convert to domain criteria. Blank values are ignored.
    pub fn to_query(&self) -> Result<ArtworkQuery, HttpError> {
        let filter = ArtworkFilter {
            query: self.q.clone(),
            artist: self.artist.clone(),
            medium: non_blank(self.medium.as_deref())
                .or_else(|| non_blank(self.style.as_deref()))
                .map(str::to_string),
            year_min: parse_optional("year_min", self.year_min_raw())?,
            year_max: parse_optional("year_max", self.year_max_raw())?,
            width_min: parse_optional("width_min", self.width_min.as_deref())?,
            width_max: parse_optional("width_max", self.width_max.as_deref())?,
        };

        let sort: ArtworkSort = self
            .sort
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(|e: artcat_core::ValidationError| HttpError::BadRequest(e.to_string()))?;

        let page = Pagination::new(
            parse_optional("offset", self.offset.as_deref())?.unwrap_or(0),
            parse_optional("limit", self.limit.as_deref())?,
        );

        Ok(ArtworkQuery::new(filter).sorted(sort).paged(page))
    }

    /// Query string for the same criteria at another offset, for pager links.
    pub fn with_offset(&self, offset: u32) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        let mut push = |key: &'static str, value: Option<&str>| {
            if let Some(v) = non_blank(value) {
                pairs.push((key, v.to_string()));
            }
        };
        push("q", self.q.as_deref());
        push("artist", self.artist.as_deref());
        push("medium", non_blank(self.medium.as_deref()).or(self.style.as_deref()));
        push("year_min", self.year_min_raw());
        push("year_max", self.year_max_raw());
        push("width_min", self.width_min.as_deref());
        push("width_max", self.width_max.as_deref());
        push("limit", self.limit.as_deref());
        push("sort", self.sort.as_deref());
        pairs.push(("offset", offset.to_string()));

        pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
