//! Paired-card matching: +10 per confirmed pair during play; on clearing the
//! board the running score is overwritten by the move-count formula.
//!
//! A valid pair references the same underlying item with complementary roles;
//! two term cards never match even when their text happens to agree.

use serde::{Deserialize, Serialize};

use crate::constants::{
    MEMORY_COMPLETION_BASE, MEMORY_COMPLETION_BONUS, MEMORY_COMPLETION_FLOOR, MEMORY_MOVE_PENALTY,
    MEMORY_PAIR_POINTS,
};
use crate::content::{CardRef, ContentItem, ItemPayload};
use crate::games::{InputError, ItemResolutionState, Resolution};

/// Pool-wide matching state: which pairs are confirmed and how many two-card
/// turns have been taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBoard {
    matched: Vec<bool>,
    moves: u32,
}

impl MemoryBoard {
    #[must_use]
    pub fn new(pairs: usize) -> Self {
        Self {
            matched: vec![false; pairs],
            moves: 0,
        }
    }

    /// Back to a fresh board over the same pool (restart).
    pub fn reset(&mut self) {
        self.matched.fill(false);
        self.moves = 0;
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn all_matched(&self) -> bool {
        !self.matched.is_empty() && self.matched.iter().all(|m| *m)
    }
}

/// Score the board is overwritten with once every pair is matched.
#[must_use]
pub fn completion_score(moves: u32) -> i32 {
    let moves = i32::try_from(moves).unwrap_or(i32::MAX);
    MEMORY_COMPLETION_FLOOR.max(MEMORY_COMPLETION_BASE.saturating_sub(
        MEMORY_MOVE_PENALTY.saturating_mul(moves),
    )) + MEMORY_COMPLETION_BONUS
}

/// Resolve one two-card turn.
pub fn resolve(
    pool: &[ContentItem],
    first: &CardRef,
    second: &CardRef,
    board: &mut MemoryBoard,
    states: &mut [ItemResolutionState],
) -> Result<Resolution, InputError> {
    if first == second {
        return Err(InputError::SameCard);
    }
    let first_index = pair_index(pool, first)?;
    let second_index = pair_index(pool, second)?;
    if board.is_matched(first_index) || board.is_matched(second_index) {
        return Err(InputError::ItemClosed);
    }

    board.moves += 1;
    let hit = first_index == second_index && first.role.complements(second.role);
    if hit {
        board.matched[first_index] = true;
        let state = &mut states[first_index];
        state.attempts += 1;
        state.resolved = true;
        state.correct = true;
        state.points_awarded += MEMORY_PAIR_POINTS;
        Ok(Resolution {
            correct: true,
            points: MEMORY_PAIR_POINTS,
            terminal: true,
        })
    } else {
        // Both cards flip back; the host shows the mismatch briefly.
        states[first_index].attempts += 1;
        if second_index != first_index {
            states[second_index].attempts += 1;
        }
        Ok(Resolution {
            correct: false,
            points: 0,
            terminal: false,
        })
    }
}

fn pair_index(pool: &[ContentItem], card: &CardRef) -> Result<usize, InputError> {
    pool.iter()
        .position(|item| item.id == card.item_id && matches!(item.payload, ItemPayload::Pair { .. }))
        .ok_or(InputError::UnknownCard)
}
