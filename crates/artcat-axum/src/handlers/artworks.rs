//! Artwork API handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use artcat_core::{Artwork, ArtworkDetail, ArtworkPage, ArtworkUpdate, CreatedArtwork};

use super::{artwork_id, json_body};
use crate::dto::{CreateArtworkRequest, ImagesJsonRequest, ListParams, UploadReport};
use crate::error::HttpError;
use crate::state::AppState;

/// Search artworks.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ArtworkPage>, HttpError> {
    let query = params.to_query()?;
    Ok(Json(state.core.catalog().search(query).await?))
}

/// Get an artwork with its images.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArtworkDetail>, HttpError> {
    let id = artwork_id(&id)?;
    Ok(Json(state.core.catalog().detail(&id).await?))
}

/// Create an artwork, optionally with base64 images.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateArtworkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedArtwork>), HttpError> {
    let req = json_body(body)?;
    let uploads = req.uploads()?;
    let created = state
        .core
        .catalog()
        .create_with_images(&req.artwork, uploads)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update an artwork.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ArtworkUpdate>, JsonRejection>,
) -> Result<Json<Artwork>, HttpError> {
    let id = artwork_id(&id)?;
    let update = json_body(body)?;
    Ok(Json(state.core.artworks().update(&id, &update).await?))
}

/// Delete an artwork with its images and files.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    let id = artwork_id(&id)?;
    state.core.catalog().delete_artwork(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach base64-encoded images.
///
/// Each image is stored or rejected on its own. The request fails with 422
/// only when none of the images could be stored.
pub async fn upload_images_json(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ImagesJsonRequest>, JsonRejection>,
) -> Result<Json<UploadReport>, HttpError> {
    let id = artwork_id(&id)?;
    let uploads = json_body(body)?.uploads()?;

    let results = state.core.catalog().attach_images(&id, uploads).await?;
    let report = UploadReport::new(id, results);
    if report.all_failed() {
        let reasons: Vec<&str> = report
            .results
            .iter()
            .filter_map(|r| r.error.as_deref())
            .collect();
        return Err(HttpError::UnprocessableEntity(format!(
            "no image could be stored: {}",
            reasons.join("; ")
        )));
    }
    Ok(Json(report))
}
