//! Common test utilities and fixtures for integration tests.
//!
//! Every context runs against an in-memory SQLite store and fixed random
//! seeds, so no environment setup is needed.

#![allow(dead_code)]

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use farsiflow_backend::config::Config;
use farsiflow_backend::db::SqliteStore;
use farsiflow_backend::models::Word;
use farsiflow_backend::{router, AppState};
use farsiflow_core::{
    BoxStore, Catalog, DurableStore, QuizController, SessionController, Trainer, STORAGE_KEY,
};

/// Test context holding shared state and the router built over it.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Context over the fixture catalog.
    pub fn new() -> Self {
        Self::with_words(fixtures::sample_words())
    }

    /// Context with no words at all.
    pub fn empty() -> Self {
        Self::with_words(Vec::new())
    }

    pub fn with_words(words: Vec<Word>) -> Self {
        let config = Config::default();
        let store = SqliteStore::open_in_memory().expect("Failed to open in-memory database");

        let session = SessionController::new(Catalog::new(words), BoxStore::load(store), config.session)
            .with_rng(StdRng::seed_from_u64(7));
        let quiz = QuizController::new().with_rng(StdRng::seed_from_u64(11));
        let mut trainer =
            Trainer::new(session, quiz).with_default_quiz_count(config.quiz_default_count);
        trainer.session_mut().start_session(Utc::now());

        let state = AppState::new(trainer, config);
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Mastery snapshot as written to SQLite, if any.
    pub fn stored_boxes(&self) -> Option<Value> {
        let trainer = self.state.trainer.lock().expect("trainer lock");
        let raw = trainer
            .session()
            .boxes()
            .store()
            .read(STORAGE_KEY)
            .expect("Failed to read store")?;
        serde_json::from_str(&raw).ok()
    }
}
