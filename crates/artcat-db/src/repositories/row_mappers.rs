//! Row mapping helpers for `SQLite` queries.

use std::collections::BTreeSet;

use artcat_core::{Artwork, ArtworkId, Image, RepositoryError};
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

/// Shared SELECT column list for artwork queries.
pub const ARTWORK_SELECT_COLUMNS: &str = "id, title, artist, year, medium, surface, width_cm, height_cm, depth_cm, description, keywords, slug, created_at";

/// Shared SELECT column list for image queries.
pub const IMAGE_SELECT_COLUMNS: &str = "seq, id, artwork_id, original_path, thumb_path, file_name, format, width, height, is_primary, created_at";

/// Map any sqlx failure to a storage error.
pub fn storage(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column).map_err(storage)
}

/// Timestamps are stored as RFC 3339 text.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Serialization(format!("bad timestamp '{raw}': {e}")))
}

/// Keywords are stored as a JSON array.
pub fn keywords_to_json(keywords: &BTreeSet<String>) -> Result<String, RepositoryError> {
    serde_json::to_string(keywords).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Parse a database row into an Artwork.
pub fn row_to_artwork(row: &SqliteRow) -> Result<Artwork, RepositoryError> {
    let id: String = get(row, "id")?;
    let keywords_json: String = get(row, "keywords")?;
    let keywords: BTreeSet<String> = serde_json::from_str(&keywords_json)
        .map_err(|e| RepositoryError::Serialization(format!("keywords of {id}: {e}")))?;
    let created_at: String = get(row, "created_at")?;

    Ok(Artwork {
        id: ArtworkId::parse(&id).map_err(|e| RepositoryError::Serialization(e.to_string()))?,
        title: get(row, "title")?,
        artist: get(row, "artist")?,
        year: get(row, "year")?,
        medium: get(row, "medium")?,
        surface: get(row, "surface")?,
        width_cm: get(row, "width_cm")?,
        height_cm: get(row, "height_cm")?,
        depth_cm: get(row, "depth_cm")?,
        description: get(row, "description")?,
        keywords,
        slug: get(row, "slug")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

/// Parse a database row into an Image.
pub fn row_to_image(row: &SqliteRow) -> Result<Image, RepositoryError> {
    let id: String = get(row, "id")?;
    let artwork_id: String = get(row, "artwork_id")?;
    let created_at: String = get(row, "created_at")?;
    let dimension = |column: &str| -> Result<u32, RepositoryError> {
        let raw: i64 = get(row, column)?;
        u32::try_from(raw)
            .map_err(|_| RepositoryError::Serialization(format!("{column} out of range: {raw}")))
    };

    Ok(Image {
        id: Uuid::parse_str(&id)
            .map_err(|e| RepositoryError::Serialization(format!("image id '{id}': {e}")))?,
        artwork_id: ArtworkId::parse(&artwork_id)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?,
        original_path: get(row, "original_path")?,
        thumb_path: get(row, "thumb_path")?,
        file_name: get(row, "file_name")?,
        format: get(row, "format")?,
        width: dimension("width")?,
        height: dimension("height")?,
        is_primary: get(row, "is_primary")?,
        seq: get(row, "seq")?,
        created_at: parse_timestamp(&created_at)?,
    })
}
