//! HTTP route handlers

pub mod catalog;
pub mod quiz;
pub mod session;
pub mod view;

use axum::http::Uri;

use crate::error::ApiError;

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
