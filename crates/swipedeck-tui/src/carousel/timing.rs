//! Time calculation utilities for paging transitions.

use std::time::Duration;

/// Fraction of a transition elapsed, clamped to [0.0, 1.0]
///
/// Transitions accumulate elapsed time explicitly (the main loop feeds
/// measured frame deltas), so progress is a pure function of two durations.
#[inline]
pub fn fraction(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Check if a transition has run its full duration
#[inline]
pub fn is_complete(elapsed: Duration, duration: Duration) -> bool {
    elapsed >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
