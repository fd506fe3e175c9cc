//! Catalog endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::Catalog;
use crate::AppState;

/// GET /api/catalog
pub async fn list(State(state): State<AppState>) -> Result<Json<Catalog>> {
    let trainer = state.trainer()?;
    Ok(Json(trainer.catalog().clone()))
}
