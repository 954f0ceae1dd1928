//! Session result calculation
//!
//! The completion evaluator runs exactly once per play-through, from inside
//! the single transition that detects exhaustion. Win rules are game-defined:
//! ratio-based games need 60% of items credited, set-based and guided games
//! win by finishing, and Pattern defines no win flag at all.

use serde::{Deserialize, Serialize};

use crate::constants::WIN_RATIO;
use crate::content::GameKind;
use crate::games::ItemResolutionState;
use crate::numbers::{percent_of, ratio_threshold};

/// Final summary of one play-through, produced exactly once at completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: i32,
    /// Items fully resolved (all of them, at completion, for set-based games).
    pub resolved: u32,
    /// Items resolved correctly or with partial credit.
    pub correct: u32,
    /// `correct` over the pool size, rounded to the nearest percent.
    pub percent: i32,
    pub won: bool,
}

/// Compute the session result for a finished play-through.
#[must_use]
pub fn evaluate(kind: GameKind, score: i32, items: &[ItemResolutionState]) -> SessionResult {
    let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
    let resolved = u32::try_from(items.iter().filter(|s| s.resolved).count()).unwrap_or(u32::MAX);
    let correct = u32::try_from(items.iter().filter(|s| s.correct).count()).unwrap_or(u32::MAX);
    let won = match kind {
        GameKind::Quiz | GameKind::NumberPattern | GameKind::MathRace => {
            total > 0 && correct >= ratio_threshold(total, WIN_RATIO)
        }
        // Finishing the board or the flow is the win condition.
        GameKind::Sort | GameKind::Memory | GameKind::Experiment => resolved == total,
        GameKind::Pattern => false,
    };
    SessionResult {
        score,
        resolved,
        correct,
        percent: percent_of(correct, total),
        won,
    }
}
