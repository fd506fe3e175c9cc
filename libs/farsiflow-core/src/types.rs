//! Core types for the Farsi/Swedish trainer.

use serde::{Deserialize, Serialize};

/// Lowest (hardest, most frequently reviewed) box.
pub const MIN_BOX: u8 = 1;
/// Highest (easiest, least frequently reviewed) box.
pub const MAX_BOX: u8 = 3;

/// Example sentence attached to a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub fa: String,
    #[serde(default)]
    pub sv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translit: Option<String>,
}

/// Vocabulary entry from the word catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    #[serde(default)]
    pub fa: String,
    /// Swedish text; `/` separates accepted variants.
    #[serde(default)]
    pub sv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt: Vec<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl Word {
    /// Create a word with only the two translations set.
    pub fn new(id: impl Into<String>, fa: impl Into<String>, sv: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fa: fa.into(),
            sv: sv.into(),
            translit: None,
            alt: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Text shown on the front of the card for a direction.
    pub fn prompt(&self, direction: Direction) -> &str {
        match direction {
            Direction::FaToSv => &self.fa,
            Direction::SvToFa => &self.sv,
        }
    }
}

/// Which language is the prompt and which is the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "fa2sv")]
    FaToSv,
    #[serde(rename = "sv2fa")]
    SvToFa,
}

impl Default for Direction {
    fn default() -> Self {
        Self::FaToSv
    }
}

impl Direction {
    /// Key suffix used by the mastery store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FaToSv => "fa2sv",
            Self::SvToFa => "sv2fa",
        }
    }

    /// Parse from the key suffix.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fa2sv" => Some(Self::FaToSv),
            "sv2fa" => Some(Self::SvToFa),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::FaToSv => Self::SvToFa,
            Self::SvToFa => Self::FaToSv,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FaToSv => "Farsi → Svenska",
            Self::SvToFa => "Svenska → Farsi",
        }
    }
}

/// Mastery state for one (word, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryEntry {
    /// Box in `MIN_BOX..=MAX_BOX`.
    #[serde(rename = "box")]
    pub level: u8,
    /// Epoch milliseconds; 0 means due immediately.
    pub due: i64,
}

impl Default for MasteryEntry {
    fn default() -> Self {
        Self {
            level: MIN_BOX,
            due: 0,
        }
    }
}

impl MasteryEntry {
    pub fn new(level: i64, due: i64) -> Self {
        Self {
            level: clamp_box(level),
            due: due.max(0),
        }
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        self.due <= now_ms
    }
}

/// Clamp any integer into the valid box range.
pub fn clamp_box(level: i64) -> u8 {
    level.clamp(MIN_BOX as i64, MAX_BOX as i64) as u8
}

/// Self-assessed grade after revealing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Hard,
    Okay,
    Easy,
}

impl Grade {
    /// Convert to the 3-point numeric value (1-3).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Hard => 1,
            Self::Okay => 2,
            Self::Easy => 3,
        }
    }

    /// Create from the 3-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Hard),
            2 => Some(Self::Okay),
            3 => Some(Self::Easy),
            _ => None,
        }
    }
}
