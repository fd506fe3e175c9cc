//! Word catalog loading.
//!
//! # Format
//! ```json
//! [
//!   {"id": "cat", "fa": "گربه", "sv": "katt", "translit": "gorbe",
//!    "alt": ["kissekatt"],
//!    "examples": [{"fa": "گربه خواب است", "sv": "Katten sover", "translit": "..."}]}
//! ]
//! ```

use crate::error::Result;
use crate::types::Word;
use serde::Serialize;
use std::collections::HashSet;

/// Parse a JSON word list and drop duplicate ids.
pub fn parse(content: &str) -> Result<Vec<Word>> {
    let words: Vec<Word> = serde_json::from_str(content)?;
    Ok(dedupe_by_id(words))
}

/// Keep the first occurrence of every id, preserving order.
pub fn dedupe_by_id(words: Vec<Word>) -> Vec<Word> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .filter(|word| seen.insert(word.id.clone()))
        .collect()
}

/// Immutable, deduplicated list of words. Sessions refer to words by index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    words: Vec<Word>,
}

impl Catalog {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words: dedupe_by_id(words),
        }
    }

    /// Parse a catalog from JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(Self {
            words: parse(content)?,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Catalog index of a word id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.words.iter().position(|word| word.id == id)
    }

    /// Map ids to catalog indices in the given order, skipping unknown ids.
    pub fn indices_of<S: AsRef<str>>(&self, ids: &[S]) -> Vec<usize> {
        ids.iter()
            .filter_map(|id| self.position(id.as_ref()))
            .collect()
    }
}
