//! Box scheduling after a graded review.

pub mod leitner;

use crate::types::{Grade, MasteryEntry};
use chrono::{DateTime, Utc};

/// Result of scheduling a card after review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingResult {
    pub new_entry: MasteryEntry,
    pub next_due: DateTime<Utc>,
    /// How many queue positions after the current one the card is reinserted.
    pub requeue_after: usize,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next entry after a review.
    fn schedule(&self, entry: &MasteryEntry, grade: Grade, now: DateTime<Utc>) -> SchedulingResult;

    /// Entry for a card that has never been graded.
    fn initial_state(&self) -> MasteryEntry {
        MasteryEntry::default()
    }
}
