//! Data Transfer Objects (DTOs) for the HTTP contract.
//!
//! Query strings and HTML forms arrive as text; these types own the
//! conversion into domain criteria and fields so that a malformed value is
//! a 400 with a field name rather than an extractor rejection.

mod forms;
mod images;
mod query;

pub use forms::ArtworkForm;
pub use images::{CreateArtworkRequest, ImagePayload, ImagesJsonRequest, UploadReport};
pub use query::ListParams;

use crate::error::HttpError;

/// Parse an optional text value, treating blank as absent.
pub(crate) fn parse_optional<T>(field: &str, raw: Option<&str>) -> Result<Option<T>, HttpError>
where
    T: std::str::FromStr,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| HttpError::BadRequest(format!("{field}: '{value}' is not a valid number"))),
    }
}
