//! Flashcard session state machine.
//!
//! ```text
//! NoCards <── (empty catalog)
//! FrontShown ──reveal──> BackRevealed ──grade──> FrontShown (next card)
//!            <───hide───
//! ```
//!
//! Running off the end of the queue builds a fresh default session, so a
//! session never ends while the catalog has words.

use crate::algorithm::leitner::Leitner;
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::boxes::BoxStore;
use crate::catalog::Catalog;
use crate::queue::SessionQueue;
use crate::rotation::ExampleRotation;
use crate::scheduler::{build_custom_session, build_session, SessionConfig};
use crate::store::DurableStore;
use crate::types::{Direction, Example, Grade, MasteryEntry, Word};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Where the current card is in its front/back cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPhase {
    /// No session could be built (empty catalog).
    #[default]
    NoCards,
    FrontShown,
    BackRevealed,
}

/// Back side of a card. The same layout is used for both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackSide {
    pub fa: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translit: Option<String>,
    pub sv: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Example>,
}

/// Mutable per-session state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub queue: SessionQueue,
    pub reps_this_session: u32,
    pub phase: CardPhase,
    /// Cached on first reveal, cleared when the card changes.
    pub back: Option<BackSide>,
}

/// What a grade did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeOutcome {
    pub word_id: String,
    pub grade: Grade,
    pub entry: MasteryEntry,
    pub next_due: DateTime<Utc>,
    /// False when the durable store rejected the write.
    pub persisted: bool,
}

/// Everything the presentation layer needs to draw the flashcard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub direction: Direction,
    pub direction_label: &'static str,
    pub phase: CardPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<BackSide>,
    pub remaining: usize,
    pub reps_this_session: u32,
    pub queue_len: usize,
}

/// Drives one flashcard session over a catalog and its mastery boxes.
pub struct SessionController<S> {
    catalog: Catalog,
    boxes: BoxStore<S>,
    algorithm: Leitner,
    config: SessionConfig,
    direction: Direction,
    state: SessionState,
    rotation: ExampleRotation,
    rng: StdRng,
}

impl<S: DurableStore> SessionController<S> {
    /// Create an idle controller. Call [`start_session`](Self::start_session)
    /// to build the first queue.
    pub fn new(catalog: Catalog, boxes: BoxStore<S>, config: SessionConfig) -> Self {
        Self {
            catalog,
            boxes,
            algorithm: Leitner::default(),
            config,
            direction: Direction::default(),
            state: SessionState::default(),
            rotation: ExampleRotation::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the random source (fixed seeds in tests).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn boxes(&self) -> &BoxStore<S> {
        &self.boxes
    }

    pub fn algorithm(&self) -> &Leitner {
        &self.algorithm
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Word under the cursor, if a card is active.
    pub fn current_word(&self) -> Option<&Word> {
        self.state
            .queue
            .current()
            .and_then(|index| self.catalog.get(index))
    }

    /// Reset state and build a default session from current mastery.
    pub fn start_session(&mut self, now: DateTime<Utc>) {
        let queue = build_session(
            &self.catalog,
            &self.boxes,
            self.direction,
            now.timestamp_millis(),
            self.config,
            &mut self.rng,
        );
        self.begin(queue);
    }

    /// Drill the given word ids in order. Unknown ids are skipped; if none
    /// remain the default session is built instead.
    pub fn start_custom_session<T: AsRef<str>>(&mut self, word_ids: &[T], now: DateTime<Utc>) {
        let indices = self.catalog.indices_of(word_ids);
        let queue = build_custom_session(
            indices,
            &self.catalog,
            &self.boxes,
            self.direction,
            now.timestamp_millis(),
            self.config,
            &mut self.rng,
        );
        self.begin(queue);
    }

    pub fn set_direction(&mut self, direction: Direction, now: DateTime<Utc>) {
        self.direction = direction;
        self.start_session(now);
    }

    pub fn toggle_direction(&mut self, now: DateTime<Utc>) {
        self.set_direction(self.direction.toggle(), now);
    }

    fn begin(&mut self, queue: SessionQueue) {
        self.state = SessionState {
            queue,
            ..SessionState::default()
        };
        self.state.phase = match self.state.queue.advance() {
            Some(_) => CardPhase::FrontShown,
            None => CardPhase::NoCards,
        };
        tracing::debug!(
            direction = self.direction.as_str(),
            cards = self.state.queue.len(),
            "session started"
        );
    }

    fn next_card(&mut self, now: DateTime<Utc>) {
        self.state.back = None;
        if self.state.queue.advance().is_some() {
            self.state.phase = CardPhase::FrontShown;
        } else {
            self.start_session(now);
        }
    }

    /// Show the back of the current card. The example sentence is drawn once
    /// per card and kept until the card changes. `None` without an active card.
    pub fn reveal(&mut self) -> Option<&BackSide> {
        match self.state.phase {
            CardPhase::NoCards => return None,
            CardPhase::FrontShown | CardPhase::BackRevealed => {}
        }

        if self.state.back.is_none() {
            let index = self.state.queue.current()?;
            let word = self.catalog.get(index)?;
            let example = self.rotation.next(word, self.direction, &mut self.rng);
            self.state.back = Some(BackSide {
                fa: word.fa.clone(),
                translit: word.translit.clone(),
                sv: word.sv.clone(),
                example,
            });
        }

        self.state.phase = CardPhase::BackRevealed;
        self.state.back.as_ref()
    }

    /// Flip back to the front side. Returns whether anything changed.
    pub fn hide(&mut self) -> bool {
        if self.state.phase != CardPhase::BackRevealed {
            return false;
        }
        self.state.phase = CardPhase::FrontShown;
        true
    }

    /// Grade the revealed card, requeue it and move to the next one.
    ///
    /// Only valid while the back is shown; otherwise nothing happens.
    pub fn grade(&mut self, grade: Grade, now: DateTime<Utc>) -> Option<GradeOutcome> {
        if self.state.phase != CardPhase::BackRevealed {
            return None;
        }
        let index = self.state.queue.current()?;
        let word_id = self.catalog.get(index)?.id.clone();

        let current = self.boxes.get(&word_id, self.direction);
        let result = self.algorithm.schedule(&current, grade, now);

        let persisted = match self.boxes.set(
            &word_id,
            self.direction,
            result.new_entry.level as i64,
            Some(result.new_entry.due),
        ) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(word = %word_id, error = %e, "failed to persist mastery");
                false
            }
        };

        self.state.queue.requeue(index, result.requeue_after);
        self.state.reps_this_session += 1;
        if self
            .state
            .queue
            .apply_anti_starvation(self.state.reps_this_session)
        {
            tracing::trace!(reps = self.state.reps_this_session, "anti-starvation moved a card");
        }

        let outcome = GradeOutcome {
            word_id,
            grade,
            entry: result.new_entry,
            next_due: result.next_due,
            persisted,
        };
        self.next_card(now);
        Some(outcome)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let word = self.current_word();
        let back = match self.state.phase {
            CardPhase::BackRevealed => self.state.back.clone(),
            CardPhase::NoCards | CardPhase::FrontShown => None,
        };

        SessionSnapshot {
            direction: self.direction,
            direction_label: self.direction.label(),
            phase: self.state.phase,
            word_id: word.map(|w| w.id.clone()),
            prompt: word.map(|w| w.prompt(self.direction).to_string()),
            back,
            remaining: self.state.queue.remaining(),
            reps_this_session: self.state.reps_this_session,
            queue_len: self.state.queue.len(),
        }
    }
}
