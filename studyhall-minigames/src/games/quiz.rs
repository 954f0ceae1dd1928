//! Single-shot multiple-choice quiz: one attempt, +10 or nothing.

use crate::constants::QUIZ_CORRECT_POINTS;
use crate::content::{ContentItem, ItemPayload};
use crate::games::{InputError, ItemResolutionState, Resolution};

/// Resolve a locked-in option index. The first resolution is terminal.
pub fn resolve(
    item: &ContentItem,
    choice: usize,
    state: &mut ItemResolutionState,
) -> Result<Resolution, InputError> {
    let ItemPayload::Choice {
        options, correct, ..
    } = &item.payload
    else {
        return Err(InputError::WrongKind);
    };
    if state.resolved {
        return Err(InputError::ItemClosed);
    }
    if choice >= options.len() {
        return Err(InputError::UnknownOption);
    }

    state.attempts += 1;
    let hit = choice == *correct;
    let points = if hit { QUIZ_CORRECT_POINTS } else { 0 };
    state.resolved = true;
    state.correct = hit;
    state.points_awarded += points;
    Ok(Resolution {
        correct: hit,
        points,
        terminal: true,
    })
}
