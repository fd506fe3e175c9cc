//! Quiz endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/quiz
pub async fn snapshot(State(state): State<AppState>) -> Result<Json<QuizSnapshot>> {
    Ok(Json(state.trainer()?.quiz().snapshot()))
}

/// POST /api/quiz/start
pub async fn start(
    State(state): State<AppState>,
    payload: std::result::Result<Json<StartQuizRequest>, JsonRejection>,
) -> Result<Json<TrainerSnapshot>> {
    let count = match payload {
        Ok(Json(p)) => p.count,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => return Err(rejection.into()),
    };

    let mut trainer = state.trainer()?;
    let phase = trainer.start_quiz(count);
    tracing::info!(?phase, "quiz started");
    Ok(Json(trainer.snapshot()))
}

/// POST /api/quiz/retry
pub async fn retry(State(state): State<AppState>) -> Result<Json<TrainerSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.retry_quiz();
    Ok(Json(trainer.snapshot()))
}

/// POST /api/quiz/submit
pub async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitAnswerRequest>, JsonRejection>,
) -> Result<Json<QuizSnapshot>> {
    let Json(payload) = payload?;
    let mut trainer = state.trainer()?;
    trainer.quiz_mut().submit(&payload.answer);
    Ok(Json(trainer.quiz().snapshot()))
}

/// POST /api/quiz/skip
pub async fn skip(State(state): State<AppState>) -> Result<Json<QuizSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.quiz_mut().skip();
    Ok(Json(trainer.quiz().snapshot()))
}

/// POST /api/quiz/next
pub async fn next(State(state): State<AppState>) -> Result<Json<QuizSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.quiz_mut().next();
    Ok(Json(trainer.quiz().snapshot()))
}

/// POST /api/quiz/drill
pub async fn drill(State(state): State<AppState>) -> Result<Json<TrainerSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.drill_mistakes(Utc::now());
    Ok(Json(trainer.snapshot()))
}

/// POST /api/quiz/back
pub async fn back(State(state): State<AppState>) -> Result<Json<TrainerSnapshot>> {
    let mut trainer = state.trainer()?;
    trainer.back_to_cards(Utc::now());
    Ok(Json(trainer.snapshot()))
}
