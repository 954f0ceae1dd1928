//! Content pool data structures
//!
//! A `ContentItem` is one fetched puzzle unit for a `(kind, grade, difficulty)`
//! key. Items are accepted as-is from the provider and never validated; a
//! malformed payload simply plays badly.

use serde::{Deserialize, Serialize};

use crate::constants::SORT_BASE_SCORE;

/// The seven interactive puzzle types sharing the session engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Quiz,
    NumberPattern,
    Pattern,
    Sort,
    Memory,
    MathRace,
    Experiment,
}

impl GameKind {
    /// Running score a fresh session starts from. Sort begins with its full
    /// placement score and loses points on misses; every other kind earns up.
    #[must_use]
    pub const fn initial_score(self) -> i32 {
        match self {
            Self::Sort => SORT_BASE_SCORE,
            _ => 0,
        }
    }

    /// Whether completion is detected per sub-element across the whole pool
    /// rather than by index exhaustion.
    #[must_use]
    pub const fn is_set_based(self) -> bool {
        matches!(self, Self::Sort | Self::Memory)
    }
}

/// School grade the content is pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grade(pub u8);

/// Difficulty band within a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Lookup key for one content pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    pub kind: GameKind,
    pub grade: Grade,
    pub difficulty: Difficulty,
}

/// Role a memory card plays; a valid pair joins complementary roles on the
/// same underlying item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardRole {
    Term,
    Match,
}

impl CardRole {
    #[must_use]
    pub const fn complements(self, other: Self) -> bool {
        !matches!(
            (self, other),
            (Self::Term, Self::Term) | (Self::Match, Self::Match)
        )
    }
}

/// Reference to one face-down memory card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRef {
    pub item_id: String,
    pub role: CardRole,
}

/// Game-specific payload carried by a [`ContentItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ItemPayload {
    /// Multiple-choice prompt (Quiz and Pattern; Pattern options are asset ids).
    Choice {
        prompt: String,
        options: Vec<String>,
        correct: usize,
    },
    /// Numeric sequence with one gap to fill.
    Sequence {
        terms: Vec<String>,
        gap_index: usize,
        answer: i64,
    },
    /// One sortable entry with its target bucket and the candidate buckets.
    Classify {
        label: String,
        bucket: String,
        buckets: Vec<String>,
    },
    /// One term/match pair; rendered as two complementary cards.
    Pair { term: String, matches: String },
    /// Timed arithmetic problem with answer options.
    Problem {
        text: String,
        answer: i64,
        options: Vec<i64>,
    },
    /// Guided experiment: hypothesis prompt, ordered steps, conclusion.
    Guided {
        hypothesis_prompt: String,
        steps: Vec<String>,
        conclusion: String,
    },
}

/// One puzzle unit, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub payload: ItemPayload,
}

impl ContentItem {
    #[must_use]
    pub fn new(id: impl Into<String>, payload: ItemPayload) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}
