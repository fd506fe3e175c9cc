//! Trainer state and view switching

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::TrainerSnapshot;
use crate::AppState;

/// GET /api/state
pub async fn state(State(state): State<AppState>) -> Result<Json<TrainerSnapshot>> {
    Ok(Json(state.trainer()?.snapshot()))
}

/// POST /api/view/flashcards
pub async fn flashcards(State(state): State<AppState>) -> Result<Json<TrainerSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.show_flashcards();
    Ok(Json(trainer.snapshot()))
}

/// POST /api/view/quiz
pub async fn quiz(State(state): State<AppState>) -> Result<Json<TrainerSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.hide_flashcards();
    Ok(Json(trainer.snapshot()))
}
