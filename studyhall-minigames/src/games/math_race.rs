//! Timed speed-math: the answer must land before the per-item countdown
//! expires. Correct answers earn a speed bonus scaled by the remaining
//! fraction; wrong answers cost 5 (floored by the session); a timeout scores
//! nothing and auto-advances.

use crate::constants::{
    MATH_RACE_CORRECT_POINTS, MATH_RACE_COUNTDOWN_UNITS, MATH_RACE_MISS_PENALTY,
    MATH_RACE_SPEED_BONUS_MAX,
};
use crate::content::{ContentItem, ItemPayload};
use crate::games::{InputError, ItemResolutionState, Resolution};
use crate::numbers::round_f64_to_i32;

/// Bonus for answering with `remaining` countdown units left.
#[must_use]
pub fn speed_bonus(remaining: u32) -> i32 {
    let fraction =
        f64::from(remaining.min(MATH_RACE_COUNTDOWN_UNITS)) / f64::from(MATH_RACE_COUNTDOWN_UNITS);
    round_f64_to_i32(f64::from(MATH_RACE_SPEED_BONUS_MAX) * fraction)
}

/// Resolve a picked option value against the active problem.
pub fn resolve(
    item: &ContentItem,
    value: i64,
    remaining: u32,
    state: &mut ItemResolutionState,
) -> Result<Resolution, InputError> {
    let ItemPayload::Problem {
        answer, options, ..
    } = &item.payload
    else {
        return Err(InputError::WrongKind);
    };
    if state.resolved {
        return Err(InputError::ItemClosed);
    }
    if !options.contains(&value) {
        return Err(InputError::UnknownOption);
    }

    state.attempts += 1;
    state.resolved = true;
    let hit = value == *answer;
    state.correct = hit;
    let points = if hit {
        MATH_RACE_CORRECT_POINTS + speed_bonus(remaining)
    } else {
        -MATH_RACE_MISS_PENALTY
    };
    state.points_awarded += points.max(0);
    Ok(Resolution {
        correct: hit,
        points,
        terminal: true,
    })
}

/// Synthesize the timeout resolution for an item whose countdown expired.
pub fn timeout(state: &mut ItemResolutionState) -> Resolution {
    state.resolved = true;
    state.correct = false;
    Resolution {
        correct: false,
        points: 0,
        terminal: true,
    }
}
