//! Request handlers

mod books;
mod interactions;
mod reviews;

pub use books::*;
pub use interactions::*;
pub use reviews::*;

use crate::error::ApiError;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Parse an internal id from a path segment
fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request(format!("Invalid id: {}", id)))
}
