//! Timer subsystem
//!
//! Logical-time countdown and stopwatch primitives driven by a repeating tick
//! of fixed unit length. A session owns at most one timer; arming a new one
//! bumps a generation counter so any tick still carrying the old handle is a
//! no-op. The same mechanism silences ticks delivered after dispose.

use serde::{Deserialize, Serialize};

/// Opaque token identifying one armed timer generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// Variant of the armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    Countdown,
    Stopwatch,
}

/// Result of delivering one tick to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Handle did not match the armed generation; nothing happened.
    Stale,
    /// Timer advanced and is still live.
    Running,
    /// A countdown observed at zero expired; the slot disarmed itself.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct ActiveTimer {
    kind: TimerKind,
    /// Units left on a countdown; unused by stopwatches.
    remaining: u32,
    /// Units elapsed since arming.
    elapsed: u32,
}

/// Single-owner timer slot with generation-based cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSlot {
    generation: u64,
    active: Option<ActiveTimer>,
}

impl TimerSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            active: None,
        }
    }

    /// Arm a countdown of `units`, cancelling any prior timer.
    pub fn arm_countdown(&mut self, units: u32) -> TimerHandle {
        self.generation += 1;
        self.active = Some(ActiveTimer {
            kind: TimerKind::Countdown,
            remaining: units,
            elapsed: 0,
        });
        TimerHandle(self.generation)
    }

    /// Arm a stopwatch counting up from zero, cancelling any prior timer.
    pub fn arm_stopwatch(&mut self) -> TimerHandle {
        self.generation += 1;
        self.active = Some(ActiveTimer {
            kind: TimerKind::Stopwatch,
            remaining: 0,
            elapsed: 0,
        });
        TimerHandle(self.generation)
    }

    /// Invalidate the current handle and disarm the slot.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.active = None;
    }

    /// Handle for the currently armed timer, if any.
    #[must_use]
    pub const fn handle(&self) -> Option<TimerHandle> {
        if self.active.is_some() {
            Some(TimerHandle(self.generation))
        } else {
            None
        }
    }

    /// Units left on an armed countdown.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.active
            .filter(|t| t.kind == TimerKind::Countdown)
            .map(|t| t.remaining)
    }

    /// Units elapsed since the armed timer started.
    #[must_use]
    pub fn elapsed(&self) -> Option<u32> {
        self.active.map(|t| t.elapsed)
    }

    /// Deliver one tick against `handle`.
    ///
    /// A countdown decrements until it reads zero; the tick observed while
    /// already at zero expires it and disarms the slot. The zero-reading
    /// window lets an answer landing exactly at expiry still resolve.
    pub fn tick(&mut self, handle: TimerHandle) -> TickOutcome {
        if handle.0 != self.generation {
            return TickOutcome::Stale;
        }
        let Some(timer) = self.active.as_mut() else {
            return TickOutcome::Stale;
        };
        timer.elapsed = timer.elapsed.saturating_add(1);
        match timer.kind {
            TimerKind::Stopwatch => TickOutcome::Running,
            TimerKind::Countdown => {
                if timer.remaining == 0 {
                    self.active = None;
                    TickOutcome::Expired
                } else {
                    timer.remaining -= 1;
                    TickOutcome::Running
                }
            }
        }
    }
}
