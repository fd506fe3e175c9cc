//! Flashcard session endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/session/new
pub async fn new_session(State(state): State<AppState>) -> Result<Json<TrainerSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.session_mut().start_session(Utc::now());
    trainer.show_flashcards();
    Ok(Json(trainer.snapshot()))
}

/// POST /api/session/custom
pub async fn custom(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CustomSessionRequest>, JsonRejection>,
) -> Result<Json<TrainerSnapshot>> {
    let Json(payload) = payload?;
    let mut trainer = state.trainer()?;
    trainer.start_custom_session(&payload.word_ids, Utc::now());
    Ok(Json(trainer.snapshot()))
}

/// POST /api/session/direction
pub async fn direction(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DirectionRequest>, JsonRejection>,
) -> Result<Json<TrainerSnapshot>> {
    // no body at all means toggle
    let payload = match payload {
        Ok(Json(p)) => p,
        Err(JsonRejection::MissingJsonContentType(_)) => DirectionRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let requested = match payload.direction {
        None => None,
        Some(raw) => Some(
            Direction::from_str(&raw)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown direction: {raw}")))?,
        ),
    };

    let mut trainer = state.trainer()?;
    let session = trainer.session_mut();
    match requested {
        Some(direction) => session.set_direction(direction, Utc::now()),
        None => session.toggle_direction(Utc::now()),
    }
    tracing::info!(direction = session.direction().as_str(), "direction changed");
    Ok(Json(trainer.snapshot()))
}

/// POST /api/session/reveal
pub async fn reveal(State(state): State<AppState>) -> Result<Json<TrainerSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.session_mut().reveal();
    Ok(Json(trainer.snapshot()))
}

/// POST /api/session/hide
pub async fn hide(State(state): State<AppState>) -> Result<Json<TrainerSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.session_mut().hide();
    Ok(Json(trainer.snapshot()))
}

/// POST /api/session/grade
pub async fn grade(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GradeRequest>, JsonRejection>,
) -> Result<Json<GradeResponse>> {
    let Json(payload) = payload?;
    let grade = payload.parse().ok_or_else(|| {
        ApiError::BadRequest(format!("grade must be 1, 2 or 3, got {}", payload.grade))
    })?;

    let mut trainer = state.trainer()?;
    let outcome = trainer.session_mut().grade(grade, Utc::now());
    if let Some(outcome) = &outcome {
        tracing::debug!(
            word = %outcome.word_id,
            grade = grade.to_value(),
            level = outcome.entry.level,
            persisted = outcome.persisted,
            "card graded"
        );
    }

    Ok(Json(GradeResponse {
        outcome,
        state: trainer.snapshot(),
    }))
}
