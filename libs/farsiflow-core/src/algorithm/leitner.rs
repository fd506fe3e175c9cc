//! Three-box Leitner scheme.
//!
//! Deliberately simpler than SM-2: a grade moves the card at most one box and
//! the box alone decides the next interval.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{clamp_box, Grade, MasteryEntry, MAX_BOX, MIN_BOX};
use chrono::{DateTime, Duration, Utc};

/// Queue offset and box change applied for one grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeRule {
    pub insert_after: usize,
    pub box_delta: i64,
}

/// Leitner scheduler with one review interval per box.
#[derive(Debug, Clone)]
pub struct Leitner {
    /// Interval for boxes 1, 2 and 3.
    pub intervals: [Duration; 3],
    pub hard: GradeRule,
    pub okay: GradeRule,
    pub easy: GradeRule,
}

impl Default for Leitner {
    fn default() -> Self {
        Self {
            intervals: [Duration::minutes(5), Duration::days(1), Duration::days(3)],
            hard: GradeRule {
                insert_after: 1,
                box_delta: -1,
            },
            okay: GradeRule {
                insert_after: 6,
                box_delta: 0,
            },
            easy: GradeRule {
                insert_after: 12,
                box_delta: 1,
            },
        }
    }
}

impl Leitner {
    pub fn rule(&self, grade: Grade) -> GradeRule {
        match grade {
            Grade::Hard => self.hard,
            Grade::Okay => self.okay,
            Grade::Easy => self.easy,
        }
    }

    /// Review interval for a box.
    pub fn interval(&self, level: u8) -> Duration {
        let level = level.clamp(MIN_BOX, MAX_BOX);
        self.intervals[(level - MIN_BOX) as usize]
    }
}

impl SpacedRepetitionAlgorithm for Leitner {
    fn name(&self) -> &'static str {
        "leitner"
    }

    fn schedule(&self, entry: &MasteryEntry, grade: Grade, now: DateTime<Utc>) -> SchedulingResult {
        let rule = self.rule(grade);
        let level = clamp_box(entry.level as i64 + rule.box_delta);
        let next_due = now + self.interval(level);

        SchedulingResult {
            new_entry: MasteryEntry {
                level,
                due: next_due.timestamp_millis(),
            },
            next_due,
            requeue_after: rule.insert_after,
        }
    }
}
