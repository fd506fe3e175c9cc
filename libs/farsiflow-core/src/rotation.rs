//! Round-robin choice of example sentences.

use crate::types::{Direction, Example, Word};
use rand::Rng;
use std::collections::HashMap;

/// Per (word, direction) cursor into the word's example list.
///
/// The first draw starts at a random offset; later draws step through the
/// list in order and wrap around.
#[derive(Debug, Clone, Default)]
pub struct ExampleRotation {
    offsets: HashMap<(String, Direction), usize>,
}

impl ExampleRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next example for `word`, or `None` if it has none.
    pub fn next<R: Rng + ?Sized>(
        &mut self,
        word: &Word,
        direction: Direction,
        rng: &mut R,
    ) -> Option<Example> {
        let len = word.examples.len();
        if len == 0 {
            return None;
        }

        let offset = self
            .offsets
            .entry((word.id.clone(), direction))
            .or_insert_with(|| rng.random_range(0..len));
        let example = word.examples[*offset % len].clone();
        *offset = (*offset + 1) % len;
        Some(example)
    }
}
