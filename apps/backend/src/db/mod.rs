//! SQLite-backed durable store for mastery snapshots.

use std::path::Path;

use farsiflow_core::{DurableStore, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

/// Key-value table holding serialized snapshots.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("cannot create database directory: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = std::result::Result<T, DbError>;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open database at path, creating it and its directory if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }
}

impl DurableStore for SqliteStore {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| StoreError::Read {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn write(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farsiflow_core::{BoxStore, Direction, STORAGE_KEY};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_key_reads_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.read("nothing").unwrap(), None);
    }

    #[test]
    fn test_write_overwrites() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.write("k", "one").unwrap();
        store.write("k", "two").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_box_store_survives_reopen() {
        let path = std::env::temp_dir()
            .join(format!("farsiflow-db-{}", std::process::id()))
            .join("boxes.db");
        let _ = std::fs::remove_file(&path);

        {
            let mut boxes = BoxStore::load(SqliteStore::open(&path).unwrap());
            boxes.set("w1", Direction::SvToFa, 3, Some(1_000)).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert!(store.read(STORAGE_KEY).unwrap().is_some());
        let boxes = BoxStore::load(store);
        let entry = boxes.get("w1", Direction::SvToFa);
        assert_eq!((entry.level, entry.due), (3, 1_000));

        let _ = std::fs::remove_file(&path);
    }
}
