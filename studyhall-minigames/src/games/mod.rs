//! Resolution strategies
//!
//! Each mini-game contributes one per-item interaction/scoring policy behind
//! the shared contract: a resolution yields correctness, points, and whether
//! the item is now closed to further input. The session controller stays
//! interaction-method-agnostic; the host maps pointer drags, card taps, and
//! clicks onto [`ResolveInput`] variants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::CardRef;

pub mod experiment;
pub mod math_race;
pub mod memory;
pub mod number_pattern;
pub mod pattern;
pub mod quiz;
pub mod sort;

pub use experiment::{ExperimentFlow, ExperimentPhase};
pub use memory::MemoryBoard;

/// Outcome of resolving one input against the active item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub correct: bool,
    /// Signed score delta; the session floors the running total where the
    /// game demands it.
    pub points: i32,
    /// Whether the item (or sub-element) is now closed to further input.
    pub terminal: bool,
}

/// Per-item (or per sub-element) resolution record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResolutionState {
    pub attempts: u32,
    pub resolved: bool,
    pub correct: bool,
    pub points_awarded: i32,
}

impl ItemResolutionState {
    /// Back to the untouched state (restart).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Player input for the active resolution strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "input")]
pub enum ResolveInput {
    /// Option index (Quiz, Pattern).
    Choice { index: usize },
    /// Raw numeric text (NumberPattern); parsed at the boundary.
    GuessText { text: String },
    /// Drag target (Sort).
    Placement { item_id: String, bucket_id: String },
    /// Two flipped cards forming one turn (Memory).
    FlipPair { first: CardRef, second: CardRef },
    /// Chosen option value (MathRace).
    Answer { value: i64 },
    /// Free-text hypothesis (Experiment).
    Hypothesis { text: String },
    /// Forward step navigation (Experiment).
    StepForward,
    /// Backward step navigation (Experiment).
    StepBack,
}

/// Input rejected at the boundary; the session state is untouched and no
/// attempt is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputError {
    #[error("input does not match the active game kind")]
    WrongKind,
    #[error("guess text is not a number")]
    NotNumeric,
    #[error("option index out of range")]
    UnknownOption,
    #[error("unknown item id {0:?}")]
    UnknownItem(String),
    #[error("unknown bucket id {0:?}")]
    UnknownBucket(String),
    #[error("card does not reference a pair in this pool")]
    UnknownCard,
    #[error("a card cannot pair with itself")]
    SameCard,
    #[error("item already resolved")]
    ItemClosed,
    #[error("input is not valid in the current phase")]
    OutOfPhase,
    #[error("session is not accepting input")]
    NotActive,
    #[error("session was disposed")]
    Disposed,
}
