//! Axum-specific error types and mappings.
//!
//! `HttpError` is the JSON error of the API. `PageError` wraps it for the
//! HTML pages, which answer with an inline error page instead.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use artcat_core::{CoreError, MediaError, RepositoryError};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Conflict (resource already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request was well formed but its content cannot be used,
    /// e.g. an upload that is not an image.
    #[error("Unprocessable: {0}")]
    UnprocessableEntity(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::Conflict(msg)
            | Self::UnprocessableEntity(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.message().to_string(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::Media(media_err) => media_err.into(),
            CoreError::Render(render_err) => Self::Internal(render_err.to_string()),
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::AlreadyExists(msg) => Self::Conflict(msg),
            RepositoryError::Storage(msg) => Self::Internal(format!("Storage: {msg}")),
            RepositoryError::Serialization(msg) => Self::Internal(format!("Serialization: {msg}")),
        }
    }
}

impl From<MediaError> for HttpError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::InvalidImage(msg) => Self::UnprocessableEntity(msg),
            // A record whose file is gone is a server-side fault.
            other @ (MediaError::NotFound(_) | MediaError::InvalidPath(_) | MediaError::Io(_)) => {
                Self::Internal(other.to_string())
            }
        }
    }
}

impl From<askama::Error> for HttpError {
    fn from(err: askama::Error) -> Self {
        Self::Internal(format!("Template: {err}"))
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    status: u16,
    reason: &'a str,
    message: &'a str,
}

/// Error of an HTML page handler, rendered as an inline error page.
#[derive(Debug)]
pub struct PageError(pub HttpError);

impl From<HttpError> for PageError {
    fn from(err: HttpError) -> Self {
        Self(err)
    }
}

impl From<CoreError> for PageError {
    fn from(err: CoreError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Page request failed");
        }

        let page = ErrorPage {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message: self.0.message(),
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => (status, format!("{status}: {} ({e})", self.0.message())).into_response(),
        }
    }
}
