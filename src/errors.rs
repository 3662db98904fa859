use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Errors surfaced by the location and weather operations.
///
/// Every variant displays its message verbatim so the transport layer can
/// forward it unchanged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A location with the same derived ID already exists.
    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    NotFound(String),

    /// The weather provider could not be reached or answered with an error status.
    #[error("{0}")]
    Fetch(String),

    /// Malformed provider response.
    #[error("{0}")]
    Parse(String),

    /// A stored record that exists but cannot be decoded.
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Read(String),

    #[error("{0}")]
    Write(String),

    #[error("{0}")]
    Delete(String),

    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Fetch(_) | AppError::Parse(_) => StatusCode::BAD_GATEWAY,
            AppError::Decode(_) | AppError::Read(_) | AppError::Write(_) | AppError::Delete(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Store error: {}", self);
        }

        (
            status,
            axum::Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
