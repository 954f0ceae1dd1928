//! Session lifecycle state machine
//!
//! One `Session` is one play-through over a fixed, shuffled sequence of
//! content items. Transitions come from exactly three sources, processed
//! strictly serially: player input via [`Session::submit`], timer ticks via
//! [`Session::tick`], and host restart/dispose. Outbound host notifications
//! are deferred through the queue and drained only after the inbound call
//! returns.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{
    LOG_ITEM_RESOLVED, LOG_ITEM_TIMEOUT, LOG_SESSION_COMPLETE, LOG_SESSION_RESTART,
    LOG_SESSION_START, MATH_RACE_COUNTDOWN_UNITS, MAX_LOG_ENTRIES, SORT_BONUS_WINDOW_UNITS,
    SORT_TIME_BONUS,
};
use crate::content::{ContentItem, GameKind};
use crate::games::{
    self, ExperimentFlow, ExperimentPhase, InputError, ItemResolutionState, MemoryBoard,
    Resolution, ResolveInput,
};
use crate::notify::{HostEvent, NotificationQueue};
use crate::result::{self, SessionResult};
use crate::shuffle::ShuffleCache;
use crate::timer::{TickOutcome, TimerHandle, TimerSlot};

/// Coarse lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Constructed, play not started; position is zero.
    Ready,
    /// The current item accepts exactly one in-flight resolution.
    ItemActive,
    /// The current item is finalized; the host controls the visible delay
    /// before [`Session::advance`].
    ItemResolved,
    /// Terminal. Entering it ran the completion evaluator exactly once.
    Complete,
}

/// One play-through over a shuffled content pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    kind: GameKind,
    pool: Vec<ContentItem>,
    seed: u64,
    shuffle: ShuffleCache,
    position: usize,
    score: i32,
    phase: SessionPhase,
    items: Vec<ItemResolutionState>,
    memory: Option<MemoryBoard>,
    experiment: Option<ExperimentFlow>,
    timers: TimerSlot,
    notify: NotificationQueue,
    completed: bool,
    notified: bool,
    result: Option<SessionResult>,
    disposed: bool,
    logs: Vec<String>,
}

impl Session {
    /// Build a session over a non-empty fetched pool. The play order is
    /// computed here, once, and reused for the session's whole lifetime
    /// (including restarts).
    #[must_use]
    pub fn new(kind: GameKind, pool: Vec<ContentItem>, seed: u64) -> Self {
        let mut shuffle = ShuffleCache::new();
        shuffle.order_for(&pool, seed);
        let items = vec![ItemResolutionState::default(); pool.len()];
        let memory = matches!(kind, GameKind::Memory).then(|| MemoryBoard::new(pool.len()));
        let experiment = matches!(kind, GameKind::Experiment).then(ExperimentFlow::new);
        Self {
            kind,
            pool,
            seed,
            shuffle,
            position: 0,
            score: kind.initial_score(),
            phase: SessionPhase::Ready,
            items,
            memory,
            experiment,
            timers: TimerSlot::new(),
            notify: NotificationQueue::new(),
            completed: false,
            notified: false,
            result: None,
            disposed: false,
            logs: Vec::new(),
        }
    }

    /// Begin play: `Ready -> ItemActive`, arming the kind's timer.
    pub fn start(&mut self) {
        if self.disposed || self.phase != SessionPhase::Ready {
            return;
        }
        self.push_log(LOG_SESSION_START);
        if self.shuffle.order().is_empty() {
            self.complete();
            return;
        }
        self.phase = SessionPhase::ItemActive;
        self.arm_session_timer();
    }

    /// Resolve player input against the active strategy.
    ///
    /// # Errors
    ///
    /// Rejected input (`InputError`) leaves the session untouched: wrong
    /// input shape for the kind, malformed text, unknown ids, input for an
    /// already-resolved item, or a session that is not accepting input.
    pub fn submit(&mut self, input: &ResolveInput) -> Result<Resolution, InputError> {
        if self.disposed {
            return Err(InputError::Disposed);
        }
        match self.phase {
            SessionPhase::ItemActive => {}
            // A second resolution while one is locked in is ignored.
            SessionPhase::ItemResolved => return Err(InputError::ItemClosed),
            SessionPhase::Ready | SessionPhase::Complete => return Err(InputError::NotActive),
        }

        let resolution = self.dispatch(input)?;
        self.apply_points(resolution.points);
        self.settle(resolution);
        Ok(resolution)
    }

    fn dispatch(&mut self, input: &ResolveInput) -> Result<Resolution, InputError> {
        let index = self.current_index().ok_or(InputError::NotActive)?;
        match (self.kind, input) {
            (GameKind::Quiz, ResolveInput::Choice { index: choice }) => {
                games::quiz::resolve(&self.pool[index], *choice, &mut self.items[index])
            }
            (GameKind::Pattern, ResolveInput::Choice { index: choice }) => {
                games::pattern::resolve(&self.pool[index], *choice, &mut self.items[index])
            }
            (GameKind::NumberPattern, ResolveInput::GuessText { text }) => {
                games::number_pattern::resolve(&self.pool[index], text, &mut self.items[index])
            }
            (GameKind::Sort, ResolveInput::Placement { item_id, bucket_id }) => {
                games::sort::resolve(&self.pool, item_id, bucket_id, &mut self.items)
            }
            (GameKind::Memory, ResolveInput::FlipPair { first, second }) => {
                let Some(board) = self.memory.as_mut() else {
                    return Err(InputError::WrongKind);
                };
                games::memory::resolve(&self.pool, first, second, board, &mut self.items)
            }
            (GameKind::MathRace, ResolveInput::Answer { value }) => {
                let remaining = self.timers.remaining().unwrap_or(0);
                games::math_race::resolve(
                    &self.pool[index],
                    *value,
                    remaining,
                    &mut self.items[index],
                )
            }
            (GameKind::Experiment, ResolveInput::Hypothesis { text }) => {
                let Some(flow) = self.experiment.as_mut() else {
                    return Err(InputError::WrongKind);
                };
                games::experiment::submit_hypothesis(
                    &self.pool[index],
                    text,
                    flow,
                    &mut self.items[index],
                )
            }
            (GameKind::Experiment, ResolveInput::StepForward) => {
                let Some(flow) = self.experiment.as_mut() else {
                    return Err(InputError::WrongKind);
                };
                games::experiment::step_forward(&self.pool[index], flow, &mut self.items[index])
            }
            (GameKind::Experiment, ResolveInput::StepBack) => {
                let Some(flow) = self.experiment.as_mut() else {
                    return Err(InputError::WrongKind);
                };
                games::experiment::step_back(flow)?;
                Ok(Resolution {
                    correct: false,
                    points: 0,
                    terminal: false,
                })
            }
            _ => Err(InputError::WrongKind),
        }
    }

    /// Fold a finalized resolution into the phase machine.
    fn settle(&mut self, resolution: Resolution) {
        match self.kind {
            GameKind::Sort => {
                if resolution.terminal && games::sort::board_cleared(&self.items) {
                    if self.timers.elapsed().unwrap_or(u32::MAX) < SORT_BONUS_WINDOW_UNITS {
                        self.apply_points(SORT_TIME_BONUS);
                    }
                    self.complete();
                }
            }
            GameKind::Memory => {
                let cleared = self.memory.as_ref().is_some_and(MemoryBoard::all_matched);
                if resolution.terminal && cleared {
                    let moves = self.memory.as_ref().map_or(0, MemoryBoard::moves);
                    self.overwrite_score(games::memory::completion_score(moves));
                    self.complete();
                }
            }
            GameKind::Quiz
            | GameKind::NumberPattern
            | GameKind::Pattern
            | GameKind::MathRace
            | GameKind::Experiment => {
                if resolution.terminal {
                    self.push_log(LOG_ITEM_RESOLVED);
                    // The countdown must die before the host can advance.
                    self.timers.cancel();
                    self.phase = SessionPhase::ItemResolved;
                }
            }
        }
    }

    /// Host-controlled transition from `ItemResolved` to the next item (or
    /// completion). A no-op in any other phase.
    pub fn advance(&mut self) {
        if self.disposed || self.phase != SessionPhase::ItemResolved {
            return;
        }
        self.advance_position();
    }

    fn advance_position(&mut self) {
        self.position += 1;
        if self.position >= self.shuffle.order().len() {
            self.complete();
            return;
        }
        self.phase = SessionPhase::ItemActive;
        if let Some(flow) = self.experiment.as_mut() {
            flow.reset();
        }
        self.arm_session_timer();
    }

    /// Deliver one logical-time tick against `handle`. Stale handles (a
    /// cancelled countdown, a disposed session) are no-ops.
    pub fn tick(&mut self, handle: TimerHandle) {
        if self.disposed {
            return;
        }
        match self.timers.tick(handle) {
            TickOutcome::Stale | TickOutcome::Running => {}
            TickOutcome::Expired => self.on_countdown_expired(),
        }
    }

    fn on_countdown_expired(&mut self) {
        // Only MathRace arms countdowns; synthesize the timeout resolution
        // and auto-advance.
        let Some(index) = self.current_index() else {
            return;
        };
        let resolution = games::math_race::timeout(&mut self.items[index]);
        debug_assert!(resolution.terminal);
        self.push_log(LOG_ITEM_TIMEOUT);
        debug!("countdown expired on item {index}; auto-advancing");
        self.advance_position();
    }

    /// Reset for a fresh play-through over the same shuffled order.
    pub fn restart(&mut self) {
        if self.disposed {
            return;
        }
        self.position = 0;
        self.score = self.kind.initial_score();
        self.phase = SessionPhase::Ready;
        for state in &mut self.items {
            state.reset();
        }
        if let Some(board) = self.memory.as_mut() {
            board.reset();
        }
        if let Some(flow) = self.experiment.as_mut() {
            flow.reset();
        }
        self.timers.cancel();
        self.completed = false;
        self.notified = false;
        self.result = None;
        self.push_log(LOG_SESSION_RESTART);
        self.notify.push(HostEvent::ScoreChanged { score: self.score });
    }

    /// Tear the session down: cancel the outstanding timer, drop pending
    /// deferred events, and turn every later inbound call into a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        debug!("session disposed in phase {:?}", self.phase);
        self.disposed = true;
        self.timers.cancel();
        self.notify.close();
    }

    /// Take the deferred outbound events, oldest first. The host calls this
    /// after each inbound call returns.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.notify.drain()
    }

    fn complete(&mut self) {
        // One-shot: re-evaluation from overlapping updates cannot re-enter.
        if self.completed {
            return;
        }
        self.completed = true;
        self.phase = SessionPhase::Complete;
        self.timers.cancel();
        let result = result::evaluate(self.kind, self.score, &self.items);
        self.push_log(LOG_SESSION_COMPLETE);
        if self.notified {
            warn!("completion re-entered after notification; suppressing");
        } else {
            self.notified = true;
            self.notify.push(HostEvent::Completed {
                result: result.clone(),
            });
        }
        self.result = Some(result);
    }

    fn apply_points(&mut self, points: i32) {
        if points == 0 {
            return;
        }
        // Running score never goes negative, whatever the penalty.
        let next = self.score.saturating_add(points).max(0);
        if next != self.score {
            self.score = next;
            self.notify.push(HostEvent::ScoreChanged { score: next });
        }
    }

    fn overwrite_score(&mut self, score: i32) {
        self.score = score.max(0);
        self.notify.push(HostEvent::ScoreChanged { score: self.score });
    }

    fn arm_session_timer(&mut self) {
        match self.kind {
            GameKind::MathRace => {
                self.timers.arm_countdown(MATH_RACE_COUNTDOWN_UNITS);
            }
            // The stopwatch runs from session start; arm it once.
            GameKind::Sort => {
                if self.timers.handle().is_none() {
                    self.timers.arm_stopwatch();
                }
            }
            _ => {}
        }
    }

    fn push_log(&mut self, key: &str) {
        if self.logs.len() < MAX_LOG_ENTRIES {
            self.logs.push(key.to_string());
        }
    }

    fn current_index(&self) -> Option<usize> {
        self.shuffle.order().get(self.position).copied()
    }

    // --- host-facing accessors -------------------------------------------

    #[must_use]
    pub const fn kind(&self) -> GameKind {
        self.kind
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub const fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Item at the current play position.
    #[must_use]
    pub fn current_item(&self) -> Option<&ContentItem> {
        self.current_index().map(|index| &self.pool[index])
    }

    /// Items in play order, for host rendering.
    #[must_use]
    pub fn play_order(&self) -> Vec<&ContentItem> {
        self.shuffle
            .order()
            .iter()
            .map(|&index| &self.pool[index])
            .collect()
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.pool.len()
    }

    /// Resolution record for the pool item with `item_id`.
    #[must_use]
    pub fn item_state(&self, item_id: &str) -> Option<&ItemResolutionState> {
        self.pool
            .iter()
            .position(|item| item.id == item_id)
            .map(|index| &self.items[index])
    }

    /// Handle the host must pass back on each timer tick, if a timer is live.
    #[must_use]
    pub const fn timer_handle(&self) -> Option<TimerHandle> {
        self.timers.handle()
    }

    /// Units left on the active countdown (MathRace).
    #[must_use]
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.timers.remaining()
    }

    /// Units elapsed on the session stopwatch (Sort).
    #[must_use]
    pub fn stopwatch_elapsed(&self) -> Option<u32> {
        self.timers.elapsed()
    }

    /// Current sub-phase of a guided experiment item.
    #[must_use]
    pub fn experiment_phase(&self) -> Option<ExperimentPhase> {
        self.experiment.as_ref().map(ExperimentFlow::phase)
    }

    /// Two-card turns taken on a memory board.
    #[must_use]
    pub fn memory_moves(&self) -> Option<u32> {
        self.memory.as_ref().map(MemoryBoard::moves)
    }

    /// Session log keys, oldest first.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}
