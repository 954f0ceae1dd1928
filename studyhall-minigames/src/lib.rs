//! StudyHall Mini-Game Session Engine
//!
//! Platform-agnostic core for StudyHall's seven interactive puzzle types.
//! This crate provides the session lifecycle, content shuffling, per-item
//! resolution strategies, timers, completion detection, and the deferred
//! host-notification channel, without UI or platform-specific dependencies.
//! The presentation layer renders session state, relays player input into
//! [`Session`], and drains [`HostEvent`]s after each call.

pub mod constants;
pub mod content;
pub mod games;
pub mod notify;
pub mod numbers;
pub mod result;
pub mod session;
pub mod shuffle;
pub mod timer;

// Re-export commonly used types
pub use content::{
    CardRef, CardRole, ContentItem, ContentKey, Difficulty, GameKind, Grade, ItemPayload,
};
pub use games::{
    ExperimentFlow, ExperimentPhase, InputError, ItemResolutionState, MemoryBoard, Resolution,
    ResolveInput,
};
pub use notify::{HostEvent, NotificationQueue};
pub use result::SessionResult;
pub use session::{Session, SessionPhase};
pub use shuffle::{ShuffleCache, pool_fingerprint};
pub use timer::{TickOutcome, TimerHandle, TimerSlot};

use log::warn;

/// Trait for abstracting content fetching.
/// Platform-specific implementations should provide this.
pub trait ContentProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the content pool for a `(kind, grade, difficulty)` key.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be fetched.
    fn fetch(&self, key: &ContentKey) -> Result<Vec<ContentItem>, Self::Error>;
}

/// What the host should render for one fetch outcome.
#[derive(Debug)]
pub enum LoadState {
    /// Fetch still pending (the host renders this before calling `load`).
    Loading,
    /// Fetch failed; retry by calling `load` again. No session state survives.
    Error(String),
    /// Provider returned an empty pool; no session exists, no timers armed.
    Empty,
    /// Session constructed over the shuffled pool, in `Ready`.
    Ready(Session),
}

/// Engine facade binding a content provider to session construction.
pub struct MinigameEngine<P>
where
    P: ContentProvider,
{
    provider: P,
}

impl<P> MinigameEngine<P>
where
    P: ContentProvider,
{
    /// Create an engine with the provided content source.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetch the pool for `key` and map the outcome to a renderable state.
    /// Calling this again after an error is the retry path; every call
    /// starts from scratch.
    pub fn load(&self, key: &ContentKey, seed: u64) -> LoadState {
        match self.provider.fetch(key) {
            Err(err) => {
                warn!("content fetch failed for {key:?}: {err}");
                LoadState::Error(err.to_string())
            }
            Ok(pool) if pool.is_empty() => LoadState::Empty,
            Ok(pool) => LoadState::Ready(Session::new(key.kind, pool, seed)),
        }
    }

    /// Construct a session directly, or `None` for an empty pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the content pool cannot be fetched.
    pub fn load_session(
        &self,
        key: &ContentKey,
        seed: u64,
    ) -> Result<Option<Session>, anyhow::Error> {
        let pool = self.provider.fetch(key).map_err(anyhow::Error::new)?;
        Ok((!pool.is_empty()).then(|| Session::new(key.kind, pool, seed)))
    }
}
