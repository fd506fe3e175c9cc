pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    routing::{get, post},
    Router,
};
use chrono::Utc;
use farsiflow_core::{
    BoxStore, Catalog, QuizController, SessionController, SpacedRepetitionAlgorithm, Trainer,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::SqliteStore;
use crate::error::{ApiError, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub trainer: Arc<Mutex<Trainer<SqliteStore>>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(trainer: Trainer<SqliteStore>, config: Config) -> Self {
        Self {
            trainer: Arc::new(Mutex::new(trainer)),
            config: Arc::new(config),
        }
    }

    /// Lock the trainer for one action. Never hold the guard across an await.
    pub fn trainer(&self) -> Result<MutexGuard<'_, Trainer<SqliteStore>>> {
        self.trainer
            .lock()
            .map_err(|_| ApiError::Internal("trainer state lock poisoned".to_string()))
    }
}

/// Assemble a trainer over `catalog` and start the first session.
pub fn build_trainer(catalog: Catalog, store: SqliteStore, config: &Config) -> Trainer<SqliteStore> {
    let boxes = BoxStore::load(store);
    tracing::info!(entries = boxes.len(), "mastery loaded");

    let mut session = SessionController::new(catalog, boxes, config.session);
    session.start_session(Utc::now());
    Trainer::new(session, QuizController::new()).with_default_quiz_count(config.quiz_default_count)
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(routes::health))
        .route("/api/state", get(routes::view::state))
        .route("/api/catalog", get(routes::catalog::list))
        // Flashcard session
        .route("/api/session/new", post(routes::session::new_session))
        .route("/api/session/custom", post(routes::session::custom))
        .route("/api/session/direction", post(routes::session::direction))
        .route("/api/session/reveal", post(routes::session::reveal))
        .route("/api/session/hide", post(routes::session::hide))
        .route("/api/session/grade", post(routes::session::grade))
        // View switching
        .route("/api/view/flashcards", post(routes::view::flashcards))
        .route("/api/view/quiz", post(routes::view::quiz))
        // Quiz
        .route("/api/quiz", get(routes::quiz::snapshot))
        .route("/api/quiz/start", post(routes::quiz::start))
        .route("/api/quiz/retry", post(routes::quiz::retry))
        .route("/api/quiz/submit", post(routes::quiz::submit))
        .route("/api/quiz/skip", post(routes::quiz::skip))
        .route("/api/quiz/next", post(routes::quiz::next))
        .route("/api/quiz/drill", post(routes::quiz::drill))
        .route("/api/quiz/back", post(routes::quiz::back));

    let api = match &state.config.static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api.fallback(routes::not_found),
    };

    api.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!("Loading catalog from {}...", config.catalog_source);
    let catalog = services::catalog::load_catalog(&config.catalog_source).await;

    tracing::info!("Opening database at {}...", config.database_path.display());
    let store = SqliteStore::open(&config.database_path)?;

    let trainer = build_trainer(catalog, store, &config);
    tracing::info!(
        algorithm = trainer.session().algorithm().name(),
        words = trainer.catalog().len(),
        "trainer ready"
    );

    let addr = config.addr();
    let app = router(AppState::new(trainer, config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
