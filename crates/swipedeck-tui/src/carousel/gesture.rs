//! Mouse drag tracking for the carousel.
//!
//! Converts raw terminal mouse motion into card-unit gesture deltas and a
//! release velocity. Dragging upward advances the deck, so a full
//! viewport-height drag equals one card. Velocity is measured over a short
//! trailing window so a flick at the end of a slow drag still registers.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Trailing window used for release velocity
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Samples kept; at 60hz this comfortably covers the velocity window
const MAX_SAMPLES: usize = 16;

#[derive(Debug)]
pub struct DragTracker {
    viewport_rows: f64,
    last_row: u16,
    /// Cumulative drag distance in cards
    total: f64,
    /// (time, cumulative distance) history for velocity estimation
    samples: VecDeque<(Instant, f64)>,
}

impl DragTracker {
    /// Start tracking a drag at `row` in a viewport `viewport_rows` tall
    pub fn new(row: u16, viewport_rows: u16, now: Instant) -> Self {
        let mut samples = VecDeque::with_capacity(MAX_SAMPLES);
        samples.push_back((now, 0.0));
        Self {
            viewport_rows: f64::from(viewport_rows.max(1)),
            last_row: row,
            total: 0.0,
            samples,
        }
    }

    /// Feed a drag position; returns the incremental delta in card units
    ///
    /// Positive delta = dragging up = toward the next card.
    pub fn update(&mut self, row: u16, now: Instant) -> f64 {
        let delta = (f64::from(self.last_row) - f64::from(row)) / self.viewport_rows;
        self.last_row = row;
        self.total += delta;

        if self.samples.len() == MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back((now, self.total));

        delta
    }

    /// Cumulative drag distance in cards
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Release velocity in cards/sec, measured over the trailing window
    pub fn release_velocity(&self, now: Instant) -> f64 {
        let Some(&(latest_time, latest_pos)) = self.samples.back() else {
            return 0.0;
        };

        // Oldest sample still inside the window
        let mut origin = (latest_time, latest_pos);
        for &(time, pos) in self.samples.iter().rev() {
            if now.duration_since(time) > VELOCITY_WINDOW {
                break;
            }
            origin = (time, pos);
        }

        let dt = latest_time.duration_since(origin.0).as_secs_f64();
        if dt <= 0.0 {
            return 0.0;
        }
        (latest_pos - origin.1) / dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_viewport_drag_is_one_card() {
        let start = Instant::now();
        let mut tracker = DragTracker::new(40, 40, start);
        let delta = tracker.update(0, start + Duration::from_millis(100));
        assert!((delta - 1.0).abs() < 1e-9);
        assert!((tracker.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_downward_drag_is_negative() {
        let start = Instant::now();
        let mut tracker = DragTracker::new(10, 40, start);
        let delta = tracker.update(20, start + Duration::from_millis(50));
        assert!(delta < 0.0);
        assert!((tracker.total() + 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_release_velocity_from_trailing_window() {
        let start = Instant::now();
        let mut tracker = DragTracker::new(40, 40, start);
        // 10 rows per 25ms = steady 10 cards/sec upward
        for i in 1..=4u16 {
            tracker.update(40 - i * 10, start + Duration::from_millis(25 * u64::from(i)));
        }
        let v = tracker.release_velocity(start + Duration::from_millis(100));
        assert!(v > 5.0, "velocity {}", v);
    }

    #[test]
    fn test_stationary_release_has_no_velocity() {
        let start = Instant::now();
        let mut tracker = DragTracker::new(20, 40, start);
        tracker.update(10, start + Duration::from_millis(20));
        // Held still past the window before releasing
        tracker.update(10, start + Duration::from_millis(400));
        let v = tracker.release_velocity(start + Duration::from_millis(400));
        assert!(v.abs() < 1e-9);
    }

    #[test]
    fn test_zero_viewport_is_clamped() {
        let start = Instant::now();
        let mut tracker = DragTracker::new(5, 0, start);
        let delta = tracker.update(4, start);
        assert!(delta.is_finite());
    }
}
