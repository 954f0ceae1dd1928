//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Integer percentage `part / total`, rounded to nearest; 0 when total is 0.
#[must_use]
pub fn percent_of(part: u32, total: u32) -> i32 {
    if total == 0 {
        return 0;
    }
    round_f64_to_i32(f64::from(part) * 100.0 / f64::from(total))
}

/// Smallest credited count that satisfies `count / total >= ratio`.
#[must_use]
pub fn ratio_threshold(total: u32, ratio: f64) -> u32 {
    let raw = (f64::from(total) * ratio).ceil();
    let min = cast::<u32, f64>(u32::MIN).unwrap_or(0.0);
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    cast::<f64, u32>(raw.clamp(min, max)).unwrap_or(0)
}
