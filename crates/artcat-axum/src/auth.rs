//! Shared-secret authentication for the JSON API.
//!
//! When an API key is configured every `/api/*` request must carry it in
//! the `X-API-Key` header. Without a configured key the check is off.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Auth middleware: validate `X-API-Key` against the configured key.
///
/// Returns 401 Unauthorized with a JSON body on mismatch.
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(expected) = state.core.settings().effective_api_key() else {
        return next.run(req).await;
    };

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided == Some(expected) {
        return next.run(req).await;
    }

    tracing::warn!(
        path = %req.uri().path(),
        header_present = provided.is_some(),
        "Unauthorized API request - missing or invalid API key"
    );
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({ "error": "missing or invalid API key", "status": 401 })),
    )
        .into_response()
}
