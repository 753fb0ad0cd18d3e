//! Image API handlers.

use axum::Json;
use axum::extract::{Path, State};

use artcat_core::{DeletedImage, Image};

use super::image_id;
use crate::error::HttpError;
use crate::state::AppState;

/// Get a single image record.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Image>, HttpError> {
    let id = image_id(&id)?;
    Ok(Json(state.core.images().get(id).await?))
}

/// Make an image the primary of its artwork.
pub async fn set_primary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Image>, HttpError> {
    let id = image_id(&id)?;
    Ok(Json(state.core.catalog().set_primary(None, id).await?))
}

/// Delete an image; reports which image was promoted, if any.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedImage>, HttpError> {
    let id = image_id(&id)?;
    Ok(Json(state.core.catalog().delete_image(None, id).await?))
}
