//! Error types for farsiflow-core.

use thiserror::Error;

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while reading a word catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed for {key}: {message}")]
    Read { key: String, message: String },

    #[error("store write failed for {key}: {message}")]
    Write { key: String, message: String },

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
