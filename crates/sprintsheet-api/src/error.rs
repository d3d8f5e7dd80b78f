//! Error types for sprintsheet-api

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sprintsheet_core::Error as CoreError;

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Error from the sheet, table, or sprint layers.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The query string or path could not be decoded.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error body: `{"error": {"category": ..., "message": ...}}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    category: &'static str,
    message: String,
}

impl ApiError {
    /// HTTP status and error category for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "validation"),
            Self::Core(e) => match e {
                CoreError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation"),
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                CoreError::Unprocessable { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable")
                }
                CoreError::Fetch { .. } | CoreError::Parse { .. } | CoreError::Io(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "source_unavailable")
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, category) = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::warn!("{category}: {message}");
        } else {
            tracing::debug!("{category}: {message}");
        }

        let body = Json(ErrorBody {
            error: ErrorDetail { category, message },
        });
        (status, body).into_response()
    }
}
