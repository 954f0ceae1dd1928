//! Two-attempt visual pattern completion: 10 then 5 points, with the answer
//! revealed after the second miss.

use crate::constants::PATTERN_LADDER;
use crate::content::{ContentItem, ItemPayload};
use crate::games::{InputError, ItemResolutionState, Resolution};

const MAX_ATTEMPTS: u32 = PATTERN_LADDER.len() as u32;

/// Resolve one option pick. Closes on a correct pick or the second miss.
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
    let points = if hit {
        PATTERN_LADDER[(state.attempts - 1).min(MAX_ATTEMPTS - 1) as usize]
    } else {
        0
    };
    // Second miss forces the reveal; the item closes with zero points.
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
