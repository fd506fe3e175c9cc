//! Word catalog loading from a local file or an HTTP URL.

use farsiflow_core::{Catalog, CatalogError, Word};
use reqwest::Client;

/// Catalog loading errors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog server returned {status}")]
    Status { status: u16 },

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch and parse the catalog.
pub async fn fetch_catalog(source: &str) -> Result<Catalog, SourceError> {
    if !is_remote(source) {
        let content = tokio::fs::read_to_string(source).await?;
        return Ok(Catalog::from_json(&content)?);
    }

    let resp = Client::new()
        .get(source)
        .send()
        .await
        .map_err(|e| SourceError::Network(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(SourceError::Status {
            status: resp.status().as_u16(),
        });
    }

    let words: Vec<Word> = resp
        .json()
        .await
        .map_err(|e| SourceError::Network(e.to_string()))?;
    Ok(Catalog::new(words))
}

/// Load the catalog, degrading to an empty one on any failure.
pub async fn load_catalog(source: &str) -> Catalog {
    match fetch_catalog(source).await {
        Ok(catalog) => {
            tracing::info!(source, words = catalog.len(), "catalog loaded");
            catalog
        }
        Err(e) => {
            tracing::warn!(source, error = %e, "could not load catalog, starting empty");
            Catalog::empty()
        }
    }
}
