//! Scoring and timing constants shared across the mini-game strategies.

/// Points for a correct single-shot quiz answer.
pub const QUIZ_CORRECT_POINTS: i32 = 10;

/// Number-pattern award ladder indexed by attempt (first attempt at index 0).
pub const NUMBER_PATTERN_LADDER: [i32; 3] = [10, 5, 2];

/// Pattern-completion award ladder indexed by attempt.
pub const PATTERN_LADDER: [i32; 2] = [10, 5];

/// Sort sessions start from a full placement score and lose points on misses.
pub const SORT_BASE_SCORE: i32 = 100;

/// Penalty for dropping a sortable item into the wrong bucket.
pub const SORT_MISS_PENALTY: i32 = 5;

/// Bonus awarded when a sort board is cleared inside the bonus window.
pub const SORT_TIME_BONUS: i32 = 20;

/// Stopwatch window (in ticks) for the sort completion bonus.
pub const SORT_BONUS_WINDOW_UNITS: u32 = 60;

/// Points per confirmed memory pair during play.
pub const MEMORY_PAIR_POINTS: i32 = 10;

/// Memory completion formula: `max(floor, base - penalty * moves) + bonus`.
pub const MEMORY_COMPLETION_BASE: i32 = 1000;
pub const MEMORY_COMPLETION_FLOOR: i32 = 100;
pub const MEMORY_MOVE_PENALTY: i32 = 10;
pub const MEMORY_COMPLETION_BONUS: i32 = 50;

/// Countdown length (in ticks) for each math-race problem.
pub const MATH_RACE_COUNTDOWN_UNITS: u32 = 30;

/// Base points for a correct math-race answer.
pub const MATH_RACE_CORRECT_POINTS: i32 = 10;

/// Maximum speed bonus, scaled by the remaining countdown fraction.
pub const MATH_RACE_SPEED_BONUS_MAX: i32 = 5;

/// Penalty for a wrong math-race answer.
pub const MATH_RACE_MISS_PENALTY: i32 = 5;

/// Hypothesis word-count tiers as `(minimum_words, points)`, checked in order.
pub const HYPOTHESIS_TIERS: [(usize, i32); 3] = [(10, 30), (5, 20), (1, 10)];

/// Points for each forward step advance in a guided experiment.
pub const EXPERIMENT_STEP_POINTS: i32 = 10;

/// Fraction of credited items required to win ratio-based games.
pub const WIN_RATIO: f64 = 0.6;

/// Cap on retained session log keys.
pub const MAX_LOG_ENTRIES: usize = 64;

/// Log keys pushed into the session log stream.
pub const LOG_SESSION_START: &str = "log.session.start";
pub const LOG_SESSION_RESTART: &str = "log.session.restart";
pub const LOG_SESSION_COMPLETE: &str = "log.session.complete";
pub const LOG_ITEM_RESOLVED: &str = "log.item.resolved";
pub const LOG_ITEM_TIMEOUT: &str = "log.item.timeout";
