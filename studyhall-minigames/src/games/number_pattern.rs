//! Attempt-limited sequence completion: the award drops 10/5/2 across three
//! guesses, and the third attempt closes the item either way.

use crate::constants::NUMBER_PATTERN_LADDER;
use crate::content::{ContentItem, ItemPayload};
use crate::games::{InputError, ItemResolutionState, Resolution};

const MAX_ATTEMPTS: u32 = NUMBER_PATTERN_LADDER.len() as u32;

/// Parse and resolve one guess. Non-numeric text is rejected before any
/// attempt is recorded.
pub fn resolve(
    item: &ContentItem,
    text: &str,
    state: &mut ItemResolutionState,
) -> Result<Resolution, InputError> {
    let ItemPayload::Sequence { answer, .. } = &item.payload else {
        return Err(InputError::WrongKind);
    };
    if state.resolved {
        return Err(InputError::ItemClosed);
    }
    let guess: i64 = text.trim().parse().map_err(|_| InputError::NotNumeric)?;

    state.attempts += 1;
    let hit = guess == *answer;
    let points = if hit {
        NUMBER_PATTERN_LADDER[(state.attempts - 1).min(MAX_ATTEMPTS - 1) as usize]
    } else {
        0
    };
    let terminal = hit || state.attempts >= MAX_ATTEMPTS;
    if terminal {
        state.resolved = true;
        state.correct = hit;
    }
    state.points_awarded += points;
    Ok(Resolution {
        correct: hit,
        points,
        terminal,
    })
}
