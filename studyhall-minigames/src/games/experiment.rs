//! Multi-phase guided experiment: a free-text hypothesis scored once by word
//! count, then forward/backward navigation through the ordered steps, closing
//! on the phase after the last step.

use serde::{Deserialize, Serialize};

use crate::constants::{EXPERIMENT_STEP_POINTS, HYPOTHESIS_TIERS};
use crate::content::{ContentItem, ItemPayload};
use crate::games::{InputError, ItemResolutionState, Resolution};

/// Sub-state within one guided item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentPhase {
    Hypothesis,
    Step(usize),
    Conclusion,
}

/// Per-item flow pointer plus the one-shot hypothesis credit flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentFlow {
    phase: ExperimentPhase,
    hypothesis_scored: bool,
}

impl Default for ExperimentFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentFlow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: ExperimentPhase::Hypothesis,
            hypothesis_scored: false,
        }
    }

    /// Back to the hypothesis phase (next item, or restart).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub const fn phase(&self) -> ExperimentPhase {
        self.phase
    }
}

/// Word-count tier credit for a hypothesis.
#[must_use]
pub fn hypothesis_points(text: &str) -> i32 {
    let words = text.split_whitespace().count();
    HYPOTHESIS_TIERS
        .iter()
        .find(|(min_words, _)| words >= *min_words)
        .map_or(0, |(_, points)| *points)
}

/// Submit the hypothesis, scoring it once and entering the step phase.
pub fn submit_hypothesis(
    item: &ContentItem,
    text: &str,
    flow: &mut ExperimentFlow,
    state: &mut ItemResolutionState,
) -> Result<Resolution, InputError> {
    let ItemPayload::Guided { steps, .. } = &item.payload else {
        return Err(InputError::WrongKind);
    };
    if flow.hypothesis_scored || flow.phase != ExperimentPhase::Hypothesis {
        return Err(InputError::OutOfPhase);
    }

    flow.hypothesis_scored = true;
    state.attempts += 1;
    let points = hypothesis_points(text);
    // An item with no steps concludes straight from the hypothesis.
    let terminal = steps.is_empty();
    flow.phase = if terminal {
        ExperimentPhase::Conclusion
    } else {
        ExperimentPhase::Step(0)
    };
    if terminal {
        state.resolved = true;
        state.correct = true;
    }
    state.points_awarded += points;
    Ok(Resolution {
        correct: true,
        points,
        terminal,
    })
}

/// Advance one step forward, awarding step credit; reaching past the last
/// step concludes the item.
pub fn step_forward(
    item: &ContentItem,
    flow: &mut ExperimentFlow,
    state: &mut ItemResolutionState,
) -> Result<Resolution, InputError> {
    let ItemPayload::Guided { steps, .. } = &item.payload else {
        return Err(InputError::WrongKind);
    };
    let ExperimentPhase::Step(index) = flow.phase else {
        return match flow.phase {
            ExperimentPhase::Conclusion => Err(InputError::ItemClosed),
            _ => Err(InputError::OutOfPhase),
        };
    };

    let next = index + 1;
    let terminal = next >= steps.len();
    flow.phase = if terminal {
        ExperimentPhase::Conclusion
    } else {
        ExperimentPhase::Step(next)
    };
    if terminal {
        state.resolved = true;
        state.correct = true;
    }
    state.points_awarded += EXPERIMENT_STEP_POINTS;
    Ok(Resolution {
        correct: true,
        points: EXPERIMENT_STEP_POINTS,
        terminal,
    })
}

/// Move the step pointer back one. Awards nothing and clears nothing, so a
/// host permitting unlimited back-and-forth lets forward credit accumulate
/// without bound; the engine does not enforce forward-only navigation.
pub fn step_back(flow: &mut ExperimentFlow) -> Result<(), InputError> {
    match flow.phase {
        ExperimentPhase::Step(index) => {
            if index > 0 {
                flow.phase = ExperimentPhase::Step(index - 1);
            }
            Ok(())
        }
        ExperimentPhase::Conclusion => Err(InputError::ItemClosed),
        ExperimentPhase::Hypothesis => Err(InputError::OutOfPhase),
    }
}
