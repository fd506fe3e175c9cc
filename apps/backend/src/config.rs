//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use farsiflow_core::{SessionConfig, DEFAULT_QUIZ_COUNT};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// File path or http(s) URL of the word list.
    pub catalog_source: String,
    pub database_path: PathBuf,
    pub session: SessionConfig,
    pub quiz_default_count: usize,
    /// Front-end assets served for unknown paths.
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            catalog_source: "words.json".to_string(),
            database_path: default_database_path(),
            session: SessionConfig::default(),
            quiz_default_count: DEFAULT_QUIZ_COUNT,
            static_dir: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Missing keys use defaults;
    /// unparseable numbers use defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            catalog_source: lookup("CATALOG_SOURCE").unwrap_or(defaults.catalog_source),
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            session: SessionConfig {
                target_size: parse_or(&lookup, "SESSION_TARGET_SIZE", defaults.session.target_size),
                min_size: parse_or(&lookup, "SESSION_MIN_SIZE", defaults.session.min_size),
            },
            quiz_default_count: parse_or(&lookup, "QUIZ_DEFAULT_COUNT", defaults.quiz_default_count),
            static_dir: lookup("STATIC_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "invalid number, using default");
            default
        }),
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("farsiflow")
        .join("farsiflow.db")
}
