//! Host notification channel
//!
//! Outbound events are deferred: transitions push into this queue and the
//! host drains it only after the inbound call has returned, so the host never
//! observes a partially-applied transition and reentrant input cannot corrupt
//! one. Disposal closes the queue and sweeps anything still pending.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::result::SessionResult;

/// Outbound event delivered to the host on the next drain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum HostEvent {
    ScoreChanged { score: i32 },
    Completed { result: SessionResult },
}

/// Deferred, cancellable outbound queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationQueue {
    pending: SmallVec<[HostEvent; 4]>,
    open: bool,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: SmallVec::new(),
            open: true,
        }
    }

    /// Queue an event for the next drain. No-op once closed.
    pub fn push(&mut self, event: HostEvent) {
        if self.open {
            self.pending.push(event);
        }
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<HostEvent> {
        self.pending.drain(..).collect()
    }

    /// Close the queue and drop anything still pending.
    pub fn close(&mut self) {
        self.pending.clear();
        self.open = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
