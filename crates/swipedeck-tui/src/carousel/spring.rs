//! Damped spring used by the pagination dots.
//!
//! Semi-implicit Euler integration of `F = -k(x - target) - c*v`, subdivided
//! into small steps so large frame deltas stay numerically stable. With
//! `c = 2*sqrt(k)` (critical damping, the default) the value approaches its
//! target without overshoot and settles without oscillation.

use std::time::Duration;

/// Maximum integration step; larger frame deltas are subdivided
const MAX_STEP_SECS: f64 = 0.004;

/// Position delta below which the spring can come to rest
const REST_THRESHOLD: f64 = 0.001;

/// Velocity magnitude below which the spring can come to rest
const VELOCITY_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring resting at `value` with the given physics parameters
    ///
    /// Stiffness is clamped to a small positive minimum; damping to zero.
    pub fn new(value: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness: stiffness.max(0.1),
            damping: damping.max(0.0),
            at_rest: true,
        }
    }

    /// Critical damping coefficient for a stiffness
    #[inline]
    pub fn critical_damping(stiffness: f64) -> f64 {
        2.0 * stiffness.max(0.1).sqrt()
    }

    /// Current value
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current target
    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring has settled at its target
    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Retarget the spring; wakes it if the target actually moved
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > REST_THRESHOLD {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Advance the spring by `dt`, subdividing for stability
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        if remaining <= 0.0 {
            return;
        }

        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            let displacement = self.value - self.target;
            let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
            self.velocity += acceleration * step;
            self.value += self.velocity * step;
            remaining -= step;
        }

        if (self.value - self.target).abs() < REST_THRESHOLD
            && self.velocity.abs() < VELOCITY_THRESHOLD
        {
            self.value = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn critically_damped(value: f64) -> Spring {
        Spring::new(value, 400.0, Spring::critical_damping(400.0))
    }

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.advance(Duration::from_millis(16));
        }
    }

    #[test]
    fn test_converges_to_target() {
        let mut spring = critically_damped(4.0);
        spring.set_target(10.0);
        run(&mut spring, 120);
        assert!(spring.is_at_rest());
        assert!((spring.value() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_overshoot_when_critically_damped() {
        let mut spring = critically_damped(0.0);
        spring.set_target(1.0);
        for _ in 0..240 {
            spring.advance(Duration::from_millis(16));
            assert!(
                spring.value() <= 1.0 + 1e-6,
                "overshoot: {}",
                spring.value()
            );
        }
        assert!(spring.is_at_rest());
    }

    #[test]
    fn test_at_rest_is_stable() {
        let mut spring = critically_damped(5.0);
        run(&mut spring, 10);
        assert!(spring.is_at_rest());
        assert!((spring.value() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_retarget_wakes_spring() {
        let mut spring = critically_damped(0.0);
        spring.set_target(1.0);
        run(&mut spring, 120);
        assert!(spring.is_at_rest());

        spring.set_target(0.0);
        assert!(!spring.is_at_rest());
        run(&mut spring, 120);
        assert!((spring.value()).abs() < 1e-9);
    }

    #[test]
    fn test_same_target_does_not_wake() {
        let mut spring = critically_damped(1.0);
        spring.set_target(1.0);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn test_large_dt_is_subdivided() {
        let mut spring = critically_damped(0.0);
        spring.set_target(1.0);
        // One giant frame instead of many small ones
        spring.advance(Duration::from_secs(2));
        assert!(spring.is_at_rest());
        assert!((spring.value() - 1.0).abs() < 1e-9);
    }
}
