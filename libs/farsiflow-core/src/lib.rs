//! Core vocabulary trainer library used by the backend.
//!
//! Provides:
//! - Word catalog parsing and lookup
//! - Three-box Leitner scheduling with per-direction mastery
//! - Session selection, requeueing and anti-starvation
//! - Fuzzy answer matching for the quiz (Levenshtein distance)
//! - Flashcard and quiz state machines behind a single `Trainer`

pub mod algorithm;
pub mod boxes;
pub mod catalog;
pub mod error;
pub mod matching;
pub mod queue;
pub mod quiz;
pub mod rotation;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod trainer;
pub mod types;

pub use algorithm::leitner::Leitner;
pub use algorithm::{SchedulingResult, SpacedRepetitionAlgorithm};
pub use boxes::{BoxStore, STORAGE_KEY};
pub use catalog::Catalog;
pub use error::{CatalogError, Result, StoreError};
pub use matching::{evaluate, levenshtein_distance, normalize_answer, AnswerStatus, Evaluation};
pub use quiz::{QuizController, QuizPhase, QuizSnapshot, QuizSummary, DEFAULT_QUIZ_COUNT};
pub use scheduler::SessionConfig;
pub use session::{CardPhase, GradeOutcome, SessionController, SessionSnapshot};
pub use store::{DurableStore, MemoryStore};
pub use trainer::{Trainer, TrainerSnapshot, View};
pub use types::{Direction, Example, Grade, MasteryEntry, Word};
