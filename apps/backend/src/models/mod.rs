//! API request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

// Re-export shared types from farsiflow-core
pub use farsiflow_core::{
    Catalog, Direction, Grade, GradeOutcome, QuizSnapshot, TrainerSnapshot, Word,
};

/// POST /api/session/custom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomSessionRequest {
    #[serde(default)]
    pub word_ids: Vec<String>,
}

/// POST /api/session/direction. Without a direction the current one is toggled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionRequest {
    #[serde(default)]
    pub direction: Option<String>,
}

/// POST /api/session/grade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    /// 1 = hard, 2 = okay, 3 = easy. Kept raw so any other value is a 400.
    pub grade: Value,
}

impl GradeRequest {
    pub fn parse(&self) -> Option<Grade> {
        self.grade
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .and_then(Grade::from_value)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeResponse {
    /// Absent when no card was revealed.
    pub outcome: Option<GradeOutcome>,
    pub state: TrainerSnapshot,
}

/// POST /api/quiz/start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartQuizRequest {
    #[serde(default)]
    pub count: Option<usize>,
}

/// POST /api/quiz/submit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    pub answer: String,
}
