//! Per-word, per-direction mastery boxes with write-through persistence.

use crate::error::StoreError;
use crate::store::DurableStore;
use crate::types::{Direction, MasteryEntry, MIN_BOX};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Namespace key of the mastery snapshot in the durable store.
pub const STORAGE_KEY: &str = "farsiflow.boxes.v1";

/// Store key for one (word, direction) pair.
pub fn box_key(word_id: &str, direction: Direction) -> String {
    format!("{}|{}", word_id, direction.as_str())
}

/// Normalize any stored value into a valid entry.
///
/// Accepted shapes:
/// - a bare box number (oldest format), e.g. `2`
/// - an object `{"box": 2, "due": 1700000000000}` where either field may be
///   missing or non-numeric
///
/// Everything else becomes the default entry.
pub fn normalize_entry(value: &Value) -> MasteryEntry {
    match value {
        Value::Number(n) => MasteryEntry::new(number_to_box(n.as_f64()), 0),
        Value::Object(fields) => {
            let level = number_to_box(fields.get("box").and_then(Value::as_f64));
            let due = fields
                .get("due")
                .and_then(Value::as_f64)
                .map(|due| due as i64)
                .unwrap_or(0);
            MasteryEntry::new(level, due)
        }
        _ => MasteryEntry::default(),
    }
}

fn number_to_box(value: Option<f64>) -> i64 {
    match value {
        Some(v) if v.is_finite() => v.round() as i64,
        _ => MIN_BOX as i64,
    }
}

/// Parse a stored snapshot. Anything that is not a JSON object yields `None`.
fn parse_snapshot(raw: &str) -> Option<BTreeMap<String, MasteryEntry>> {
    let object: Map<String, Value> = serde_json::from_str(raw).ok()?;
    Some(
        object
            .iter()
            .map(|(key, value)| (key.clone(), normalize_entry(value)))
            .collect(),
    )
}

/// Mastery entries backed by a durable store.
///
/// The whole map is rewritten under [`STORAGE_KEY`] on every mutation.
#[derive(Debug)]
pub struct BoxStore<S> {
    store: S,
    entries: BTreeMap<String, MasteryEntry>,
}

impl<S: DurableStore> BoxStore<S> {
    /// Read the snapshot from `store`. Missing or corrupt data gives an empty map.
    pub fn load(store: S) -> Self {
        let entries = match store.read(STORAGE_KEY) {
            Ok(Some(raw)) => parse_snapshot(&raw).unwrap_or_else(|| {
                tracing::debug!("discarding unreadable mastery snapshot");
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                tracing::debug!(error = %e, "mastery snapshot read failed, starting empty");
                BTreeMap::new()
            }
        };

        Self { store, entries }
    }

    /// Stored entry, or the default `{box: 1, due: 0}`.
    pub fn get(&self, word_id: &str, direction: Direction) -> MasteryEntry {
        self.entries
            .get(&box_key(word_id, direction))
            .copied()
            .unwrap_or_default()
    }

    /// Set the box (clamped) and optionally the due time, then flush.
    ///
    /// When `due` is `None` the previous due time is kept. The in-memory
    /// entry is updated even if the flush fails.
    pub fn set(
        &mut self,
        word_id: &str,
        direction: Direction,
        level: i64,
        due: Option<i64>,
    ) -> Result<MasteryEntry, StoreError> {
        let key = box_key(word_id, direction);
        let previous_due = self.entries.get(&key).map(|e| e.due).unwrap_or(0);
        let entry = MasteryEntry::new(level, due.unwrap_or(previous_due));
        self.entries.insert(key, entry);
        self.flush()?;
        Ok(entry)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string(&self.entries)?;
        self.store.write(STORAGE_KEY, &snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stored entries keyed by `"<wordId>|<direction>"`.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &MasteryEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
