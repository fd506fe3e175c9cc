//! Top-level trainer tying the flashcard session and the quiz together.

use crate::catalog::Catalog;
use crate::quiz::{QuizController, QuizPhase, QuizSnapshot, DEFAULT_QUIZ_COUNT};
use crate::session::{SessionController, SessionSnapshot};
use crate::store::DurableStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which side of the trainer is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Flashcards,
    Quiz,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainerSnapshot {
    pub view: View,
    pub session: SessionSnapshot,
    pub quiz: QuizSnapshot,
}

pub struct Trainer<S> {
    session: SessionController<S>,
    quiz: QuizController,
    view: View,
    default_quiz_count: usize,
    last_quiz_count: Option<usize>,
}

impl<S: DurableStore> Trainer<S> {
    pub fn new(session: SessionController<S>, quiz: QuizController) -> Self {
        Self {
            session,
            quiz,
            view: View::Flashcards,
            default_quiz_count: DEFAULT_QUIZ_COUNT,
            last_quiz_count: None,
        }
    }

    pub fn with_default_quiz_count(mut self, count: usize) -> Self {
        self.default_quiz_count = count;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        self.session.catalog()
    }

    pub fn session(&self) -> &SessionController<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionController<S> {
        &mut self.session
    }

    pub fn quiz(&self) -> &QuizController {
        &self.quiz
    }

    pub fn quiz_mut(&mut self) -> &mut QuizController {
        &mut self.quiz
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Drill `word_ids` as flashcards, or the default session if none match.
    pub fn start_custom_session<T: AsRef<str>>(&mut self, word_ids: &[T], now: DateTime<Utc>) {
        self.session.start_custom_session(word_ids, now);
        self.show_flashcards();
    }

    pub fn show_flashcards(&mut self) {
        self.view = View::Flashcards;
    }

    pub fn hide_flashcards(&mut self) {
        self.view = View::Quiz;
    }

    /// Start a quiz with `count` questions (the configured default if `None`).
    pub fn start_quiz(&mut self, count: Option<usize>) -> QuizPhase {
        let count = count.unwrap_or(self.default_quiz_count);
        self.last_quiz_count = Some(count);
        self.hide_flashcards();
        self.quiz.start(self.session.catalog().words(), count)
    }

    /// Start a new quiz with the same question count as the last one.
    pub fn retry_quiz(&mut self) -> QuizPhase {
        self.start_quiz(self.last_quiz_count)
    }

    /// Turn the last quiz's mistakes into a flashcard session.
    pub fn drill_mistakes(&mut self, now: DateTime<Utc>) {
        let ids = self.quiz.mistake_ids();
        tracing::debug!(words = ids.len(), "drilling quiz mistakes");
        self.start_custom_session(&ids, now);
    }

    /// Leave the quiz for a fresh default session.
    pub fn back_to_cards(&mut self, now: DateTime<Utc>) {
        self.start_custom_session::<String>(&[], now);
    }

    pub fn snapshot(&self) -> TrainerSnapshot {
        TrainerSnapshot {
            view: self.view,
            session: self.session.snapshot(),
            quiz: self.quiz.snapshot(),
        }
    }
}
