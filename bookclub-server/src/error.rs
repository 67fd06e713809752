//! JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookclub_core::{BookclubError, StorageError};
use serde_json::json;

/// An error rendered as `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Authentication required")
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(what) => Self::not_found(format!("Not found: {}", what)),
            StorageError::Conflict(what) => Self::new(StatusCode::CONFLICT, what),
            StorageError::BackendError(msg) => {
                tracing::error!("Storage failure: {}", msg);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal storage error")
            }
        }
    }
}

impl From<BookclubError> for ApiError {
    fn from(e: BookclubError) -> Self {
        match e {
            BookclubError::Storage(e) => e.into(),
            BookclubError::NotFound(what) => Self::not_found(what),
            BookclubError::Validation(msg) => Self::bad_request(msg),
            BookclubError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, msg),
            BookclubError::Io(e) => {
                tracing::error!("I/O failure: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
