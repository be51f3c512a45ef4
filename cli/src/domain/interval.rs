//! Poll interval parsing.

use std::time::Duration;

/// Built-in poll interval when neither flag nor config sets one.
pub const DEFAULT_WAIT_INTERVAL_SECS: f64 = 10.0;

/// Parse a positive number of seconds.
///
/// Returns `None` for anything that is not a finite number greater than zero,
/// or that does not make a non-zero [`Duration`].
#[must_use]
pub fn parse_seconds(raw: &str) -> Option<f64> {
    let secs: f64 = raw.trim().parse().ok()?;
    (secs.is_finite() && secs > 0.0 && to_duration(secs).is_some()).then_some(secs)
}

/// Resolve the poll interval from an optional user-supplied value.
///
/// Unparsable, non-positive, and non-finite values fall back to `default_secs`,
/// as do values too small to survive nanosecond rounding. A bad `default_secs`
/// falls back to [`DEFAULT_WAIT_INTERVAL_SECS`].
#[must_use]
pub fn parse_wait_interval(raw: Option<&str>, default_secs: f64) -> Duration {
    let fallback = Some(default_secs)
        .filter(|s| s.is_finite() && *s > 0.0)
        .and_then(to_duration)
        .unwrap_or(Duration::from_secs_f64(DEFAULT_WAIT_INTERVAL_SECS));
    raw.and_then(parse_seconds)
        .and_then(to_duration)
        .unwrap_or(fallback)
}

/// Non-zero duration for `secs`, or `None` if it overflows or rounds to zero.
fn to_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
}
