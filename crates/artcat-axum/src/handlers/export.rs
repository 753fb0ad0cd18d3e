//! One-page PDF export.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use super::artwork_id;
use crate::error::PageError;
use crate::state::AppState;

/// Render the artwork sheet as an inline PDF.
pub async fn onepager(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, PageError> {
    let id = artwork_id(&id)?;
    let pdf = state.core.catalog().export_onepager(&id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{id}_onepager.pdf\""),
            ),
        ],
        pdf,
    ))
}
