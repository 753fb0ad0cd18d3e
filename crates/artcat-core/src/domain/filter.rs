//! Search criteria for the artwork list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Optional criteria combined with AND.
///
/// Text criteria are case-insensitive substring matches. Ranges are
/// inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkFilter {
    /// Free text matched against title, description and keywords.
    pub query: Option<String>,
    pub artist: Option<String>,
    /// Matched against the medium field.
    pub medium: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub width_min: Option<f64>,
    pub width_max: Option<f64>,
}

impl ArtworkFilter {
    /// Trim text criteria and drop the ones that are blank.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            query: non_blank(self.query),
            artist: non_blank(self.artist),
            medium: non_blank(self.medium),
            ..self
        }
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.artist.is_none()
            && self.medium.is_none()
            && self.year_min.is_none()
            && self.year_max.is_none()
            && self.width_min.is_none()
            && self.width_max.is_none()
    }

    /// True when a range has `min > max`, which matches nothing.
    pub fn is_unsatisfiable(&self) -> bool {
        matches!((self.year_min, self.year_max), (Some(lo), Some(hi)) if lo > hi)
            || matches!((self.width_min, self.width_max), (Some(lo), Some(hi)) if lo > hi)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("width_min", self.width_min), ("width_max", self.width_max)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ValidationError::new(field, "must be a finite number"));
            }
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Result ordering. Every order breaks ties by ascending id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtworkSort {
    #[default]
    IdAsc,
    IdDesc,
    YearAsc,
    YearDesc,
    TitleAsc,
}

impl ArtworkSort {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdAsc => "id",
            Self::IdDesc => "-id",
            Self::YearAsc => "year",
            Self::YearDesc => "-year",
            Self::TitleAsc => "title",
        }
    }
}

impl fmt::Display for ArtworkSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtworkSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "id" => Ok(Self::IdAsc),
            "-id" => Ok(Self::IdDesc),
            "year" => Ok(Self::YearAsc),
            "-year" => Ok(Self::YearDesc),
            "title" => Ok(Self::TitleAsc),
            other => Err(ValidationError::new(
                "sort",
                format!("unknown sort '{other}' (expected id, -id, year, -year or title)"),
            )),
        }
    }
}

/// Offset/limit window over the ordered result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u32,
    /// `None` returns everything after `offset`.
    pub limit: Option<u32>,
}

impl Pagination {
    pub const fn new(offset: u32, limit: Option<u32>) -> Self {
        Self { offset, limit }
    }

    /// Cap the limit at `max`. An absent limit stays absent.
    #[must_use]
    pub fn clamped(self, max: u32) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit.map(|l| l.min(max)),
        }
    }
}

/// A complete list request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtworkQuery {
    pub filter: ArtworkFilter,
    pub sort: ArtworkSort,
    pub page: Pagination,
}

impl ArtworkQuery {
    pub fn new(filter: ArtworkFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn sorted(mut self, sort: ArtworkSort) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub const fn paged(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }
}
