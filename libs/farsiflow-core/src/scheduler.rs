//! Practice session selection and ordering.

use crate::boxes::BoxStore;
use crate::catalog::Catalog;
use crate::queue::SessionQueue;
use crate::store::DurableStore;
use crate::types::{Direction, MasteryEntry};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Session size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of due cards taken into a session.
    pub target_size: usize,
    /// Sessions smaller than this are topped up with upcoming cards.
    pub min_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_size: 20,
            min_size: 10,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    entry: MasteryEntry,
}

/// Pick the cards for a default session, before ordering.
///
/// Due cards come first (soonest due, then lowest box); upcoming cards only
/// fill the session up to `min_size`, or stand in when nothing else exists.
fn select<S: DurableStore>(
    catalog: &Catalog,
    boxes: &BoxStore<S>,
    direction: Direction,
    now_ms: i64,
    config: SessionConfig,
) -> Vec<Candidate> {
    let (mut due, mut upcoming): (Vec<Candidate>, Vec<Candidate>) = catalog
        .words()
        .iter()
        .enumerate()
        .map(|(index, word)| Candidate {
            index,
            entry: boxes.get(&word.id, direction),
        })
        .partition(|c| c.entry.is_due(now_ms));

    due.sort_by_key(|c| (c.entry.due, c.entry.level));
    upcoming.sort_by_key(|c| c.entry.due);

    let mut selected: Vec<Candidate> = due.into_iter().take(config.target_size).collect();
    if selected.len() < config.min_size {
        let missing = config.min_size - selected.len();
        selected.extend(upcoming.iter().take(missing).copied());
    }
    if selected.is_empty() {
        selected = upcoming.into_iter().take(config.target_size).collect();
    }
    selected
}

/// Group by box (box 1 first) and shuffle within each box.
fn order_by_box<R: Rng + ?Sized>(selected: Vec<Candidate>, rng: &mut R) -> Vec<usize> {
    let mut groups: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for candidate in selected {
        groups
            .entry(candidate.entry.level)
            .or_default()
            .push(candidate.index);
    }

    let mut ordered = Vec::new();
    for mut group in groups.into_values() {
        group.shuffle(&mut *rng);
        ordered.extend(group);
    }
    ordered
}

/// Build the default session for `direction` from current mastery state.
pub fn build_session<S: DurableStore, R: Rng + ?Sized>(
    catalog: &Catalog,
    boxes: &BoxStore<S>,
    direction: Direction,
    now_ms: i64,
    config: SessionConfig,
    rng: &mut R,
) -> SessionQueue {
    let selected = select(catalog, boxes, direction, now_ms, config);
    SessionQueue::new(order_by_box(selected, rng))
}

/// Use an explicit ordered list of catalog indices, or the default session
/// when the list is empty.
pub fn build_custom_session<S: DurableStore, R: Rng + ?Sized>(
    indices: Vec<usize>,
    catalog: &Catalog,
    boxes: &BoxStore<S>,
    direction: Direction,
    now_ms: i64,
    config: SessionConfig,
    rng: &mut R,
) -> SessionQueue {
    if indices.is_empty() {
        return build_session(catalog, boxes, direction, now_ms, config, rng);
    }
    SessionQueue::new(indices)
}
