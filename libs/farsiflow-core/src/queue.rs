//! Ordered practice queue with requeue and anti-starvation.

use serde::Serialize;
use std::collections::HashSet;

/// Anti-starvation runs on every n-th repetition of a session.
pub const ANTI_STARVE_EVERY: u32 = 7;
/// Offset after the cursor where the starved card is reinserted.
pub const ANTI_STARVE_OFFSET: usize = 3;

/// Catalog indices in presentation order. Repeats are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionQueue {
    entries: Vec<usize>,
    /// `None` before the first card has been shown.
    cursor: Option<usize>,
}

impl SessionQueue {
    pub fn new(entries: Vec<usize>) -> Self {
        Self {
            entries,
            cursor: None,
        }
    }

    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Catalog index under the cursor.
    pub fn current(&self) -> Option<usize> {
        self.cursor.and_then(|c| self.entries.get(c).copied())
    }

    /// Move to the next entry. `None` once the cursor passes the end.
    pub fn advance(&mut self) -> Option<usize> {
        let next = self.cursor.map_or(0, |c| c + 1);
        self.cursor = Some(next);
        self.entries.get(next).copied()
    }

    /// Insert another occurrence of `index` `insert_after` places past the cursor.
    ///
    /// Existing occurrences are left where they are. Returns the insert position.
    pub fn requeue(&mut self, index: usize, insert_after: usize) -> usize {
        let target = match self.cursor {
            Some(c) => c + insert_after,
            None => insert_after.saturating_sub(1),
        };
        let position = target.min(self.entries.len());
        self.entries.insert(position, index);
        position
    }

    /// Pull the last entry forward to just after the cursor on every
    /// [`ANTI_STARVE_EVERY`]-th repetition. Returns whether anything moved.
    pub fn apply_anti_starvation(&mut self, reps: u32) -> bool {
        if reps == 0 || reps % ANTI_STARVE_EVERY != 0 {
            return false;
        }
        let Some(cursor) = self.cursor else {
            return false;
        };
        if self.entries.len() <= cursor + ANTI_STARVE_OFFSET + 1 {
            return false;
        }

        if let Some(moved) = self.entries.pop() {
            self.entries.insert(cursor + ANTI_STARVE_OFFSET, moved);
        }
        true
    }

    /// Distinct catalog indices still ahead of the cursor.
    pub fn remaining(&self) -> usize {
        let start = self.cursor.map_or(0, |c| c + 1);
        self.entries
            .get(start..)
            .map(|ahead| ahead.iter().collect::<HashSet<_>>().len())
            .unwrap_or(0)
    }
}
