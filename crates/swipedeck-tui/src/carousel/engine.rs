//! Paging engine: owns the carousel's progress value.
//!
//! `progress` is a continuous position in whole-card units and the single
//! source of truth for the whole screen; card transforms and pagination dots
//! are pure derivations of it. Non-integral values occur only while a gesture
//! or a committed transition is in flight, and always converge back to an
//! integer (a settled index) at rest.
//!
//! Paging semantics: one card per committed swipe. A release either commits
//! to the adjacent index (drag distance or flick velocity past the configured
//! thresholds) or snaps back to the held index. Commits run a time-bounded
//! ease over a fixed duration; a new gesture cancels an in-flight transition
//! and continues from its current value. There is no queue of paging
//! commands.

use std::time::Duration;

use swipedeck_core::{CarouselConfig, Error, Result};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{fraction, is_complete, lerp};

/// Progress distance from the target below which a transition snaps to rest
const SETTLE_EPSILON: f64 = 1e-3;

/// Largest single gesture delta the engine accepts (cards)
const MAX_GESTURE_DELTA: f64 = 2.0;

/// Fired exactly once when a committed transition reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub index: usize,
}

/// In-flight gesture state
#[derive(Debug, Clone)]
struct Drag {
    /// Progress when the gesture began
    base: f64,
    /// Accumulated drag offset, clamped to one card either way
    offset: f64,
}

/// Committed (or snap-back) transition toward an integral target
#[derive(Debug, Clone)]
struct Transition {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingType,
}

pub struct CarouselEngine {
    len: usize,
    config: CarouselConfig,
    progress: f64,
    drag: Option<Drag>,
    transition: Option<Transition>,
    /// Settlement from a commit that landed exactly on its target, delivered
    /// on the next `advance`
    pending: Option<Settlement>,
}

impl CarouselEngine {
    /// Create an engine over `len` cards
    ///
    /// Refuses to mount an empty deck: every other method assumes at least
    /// one valid index exists.
    pub fn new(len: usize, config: CarouselConfig) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptyDeck);
        }
        Ok(Self {
            len,
            config,
            progress: 0.0,
            drag: None,
            transition: None,
            pending: None,
        })
    }

    /// Number of cards
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether index arithmetic wraps at the deck boundaries
    #[inline]
    pub fn looping(&self) -> bool {
        self.config.looping
    }

    /// Enable or disable looping
    pub fn set_looping(&mut self, looping: bool) {
        self.config.looping = looping;
    }

    /// Current continuous progress, in card units
    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Nearest card index to the current progress
    pub fn current_index(&self) -> usize {
        self.wrap_index(self.progress.round())
    }

    /// Whether a gesture is holding progress
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether a committed transition is in flight
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Check if there's pending work requiring frame updates
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.transition.is_some() || self.pending.is_some()
    }

    /// Start a gesture
    ///
    /// Cancels any in-flight transition immediately: the transition's current
    /// value (not its target) becomes the base of the new trajectory.
    pub fn begin_gesture(&mut self) {
        self.transition = None;
        self.pending = None;
        self.drag = Some(Drag {
            base: self.progress,
            offset: 0.0,
        });
    }

    /// Accumulate an in-flight drag delta (positive = toward the next card)
    ///
    /// Out-of-range input from the runtime is clamped, never propagated: a
    /// single delta is bounded, the total offset is held within one card, and
    /// non-looping decks pin progress inside [0, N-1] during the drag.
    pub fn gesture_delta(&mut self, delta: f64) {
        if self.drag.is_none() {
            self.begin_gesture();
        }
        let delta = if delta.is_finite() {
            delta.clamp(-MAX_GESTURE_DELTA, MAX_GESTURE_DELTA)
        } else {
            0.0
        };

        let looping = self.config.looping;
        let len = self.len;
        if let Some(drag) = self.drag.as_mut() {
            drag.offset = (drag.offset + delta).clamp(-1.0, 1.0);
            let mut progress = drag.base + drag.offset;
            if !looping {
                progress = progress.clamp(0.0, (len - 1) as f64);
                drag.offset = progress - drag.base;
            }
            self.progress = progress;
        }
    }

    /// End the gesture and decide between commit and snap-back
    ///
    /// `velocity` is the release velocity in cards/sec; it only counts toward
    /// a commit when it agrees with the drag direction (or the drag barely
    /// moved).
    pub fn end_gesture(&mut self, velocity: f64) {
        let Some(drag) = self.drag.take() else {
            return;
        };

        let velocity = if velocity.is_finite() {
            velocity.clamp(-self.config.max_velocity, self.config.max_velocity)
        } else {
            0.0
        };

        let offset = drag.offset;
        let dir = if offset.abs() > f64::EPSILON {
            offset.signum()
        } else if velocity.abs() > f64::EPSILON {
            velocity.signum()
        } else {
            0.0
        };

        let velocity_agrees = offset.abs() <= f64::EPSILON || velocity.signum() == offset.signum();
        let commits = dir != 0.0
            && (offset.abs() >= self.config.commit_distance
                || (velocity_agrees && velocity.abs() >= self.config.commit_velocity));

        let anchor = drag.base.round();
        let step = if commits { dir } else { 0.0 };
        let moved = (self.progress - drag.base).abs() > f64::EPSILON;
        self.commit_to(anchor, step, moved);
    }

    /// Page forward through the same commit machinery as a swipe
    pub fn page_next(&mut self) {
        if self.is_dragging() {
            return;
        }
        self.transition = None;
        self.commit_to(self.progress.round(), 1.0, false);
    }

    /// Page backward
    pub fn page_prev(&mut self) {
        if self.is_dragging() {
            return;
        }
        self.transition = None;
        self.commit_to(self.progress.round(), -1.0, false);
    }

    /// Jump to an index with the same bounded transition
    pub fn go_to(&mut self, index: usize) {
        if self.is_dragging() || index >= self.len {
            return;
        }
        self.transition = None;
        self.start_transition(index as f64, false);
    }

    /// Advance animations by a frame delta; reports at most one settlement
    ///
    /// Progress moves monotonically toward the transition target. When the
    /// transition reaches the target within an epsilon, progress snaps to the
    /// exact integer and a settlement fires exactly once. Advancing an engine
    /// at rest is a no-op.
    pub fn advance(&mut self, dt: Duration) -> Option<Settlement> {
        if self.drag.is_some() {
            return None;
        }
        if let Some(settlement) = self.pending.take() {
            return Some(settlement);
        }

        let transition = self.transition.as_mut()?;
        transition.elapsed += dt;

        let t = fraction(transition.elapsed, transition.duration);
        let eased = transition.easing.apply(t);
        self.progress = lerp(transition.from, transition.to, eased);

        let done = is_complete(transition.elapsed, transition.duration)
            || (self.progress - transition.to).abs() < SETTLE_EPSILON;
        if !done {
            return None;
        }

        let target = transition.to;
        self.transition = None;
        let index = self.wrap_index(target);
        self.progress = if self.config.looping {
            target.rem_euclid(self.len as f64)
        } else {
            target.clamp(0.0, (self.len - 1) as f64)
        };
        Some(Settlement { index })
    }

    /// Relative offset of a card from the current progress
    ///
    /// With looping enabled offsets wrap so the deck reads as an endless
    /// stack: the result lies in [-1, N-1), where negative values are cards
    /// scrolling away above the viewport.
    pub fn offset_of(&self, index: usize) -> f64 {
        if self.config.looping {
            let n = self.len as f64;
            let raw = (index as f64 - self.progress).rem_euclid(n);
            if raw > n - 1.0 {
                raw - n
            } else {
                raw
            }
        } else {
            index as f64 - self.progress
        }
    }

    /// Commit `step` cards away from `anchor` (0 = snap back), honoring the
    /// boundary policy
    ///
    /// `displaced` marks whether the preceding gesture actually moved
    /// progress: a drag that lands exactly on the target still settles (once),
    /// while a rejected boundary page with no displacement stays silent.
    fn commit_to(&mut self, anchor: f64, step: f64, displaced: bool) {
        let mut target = anchor + step;

        // One card cannot page anywhere; every gesture settles back to 0
        if self.len == 1 {
            target = 0.0;
        } else if !self.config.looping {
            target = target.clamp(0.0, (self.len - 1) as f64);
        }

        self.start_transition(target, displaced);
    }

    fn start_transition(&mut self, target: f64, notify_if_settled: bool) {
        if (self.progress - target).abs() < SETTLE_EPSILON {
            // Already on the target: nothing to animate
            let index = self.wrap_index(target);
            self.progress = if self.config.looping {
                target.rem_euclid(self.len as f64)
            } else {
                target
            };
            if notify_if_settled {
                self.pending = Some(Settlement { index });
            }
            return;
        }

        self.transition = Some(Transition {
            from: self.progress,
            to: target,
            elapsed: Duration::ZERO,
            duration: Duration::from_millis(self.config.snap_duration_ms),
            easing: self.config.easing,
        });
    }

    fn wrap_index(&self, position: f64) -> usize {
        let n = self.len as f64;
        if self.config.looping {
            position.rem_euclid(n) as usize % self.len
        } else {
            position.clamp(0.0, n - 1.0) as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn engine(len: usize, looping: bool) -> CarouselEngine {
        let config = CarouselConfig {
            looping,
            ..Default::default()
        };
        CarouselEngine::new(len, config).unwrap()
    }

    /// Run frames until the engine rests, collecting settlements
    fn run_to_rest(engine: &mut CarouselEngine) -> Vec<usize> {
        let mut settled = Vec::new();
        for _ in 0..200 {
            if let Some(s) = engine.advance(FRAME) {
                settled.push(s.index);
            }
            if !engine.needs_update() {
                break;
            }
        }
        settled
    }

    fn swipe(engine: &mut CarouselEngine, offset: f64, velocity: f64) -> Vec<usize> {
        engine.begin_gesture();
        engine.gesture_delta(offset);
        engine.end_gesture(velocity);
        run_to_rest(engine)
    }

    #[test]
    fn test_empty_deck_refused() {
        let result = CarouselEngine::new(0, CarouselConfig::default());
        assert!(matches!(result, Err(Error::EmptyDeck)));
    }

    #[test]
    fn test_commit_settles_on_next_index() {
        let mut engine = engine(3, true);
        let settled = swipe(&mut engine, 0.6, 0.0);
        assert_eq!(settled, vec![1]);
        assert_eq!(engine.progress(), 1.0);
        assert!(!engine.is_animating());
    }

    #[test]
    fn test_small_drag_snaps_back() {
        let mut engine = engine(3, true);
        let settled = swipe(&mut engine, 0.1, 0.0);
        assert_eq!(settled, vec![0]);
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn test_flick_velocity_commits() {
        let mut engine = engine(3, true);
        let settled = swipe(&mut engine, 0.05, 3.0);
        assert_eq!(settled, vec![1]);
    }

    #[test]
    fn test_opposing_velocity_does_not_commit() {
        let mut engine = engine(3, true);
        // Dragged up a little, flicked down hard: stays put
        let settled = swipe(&mut engine, 0.1, -5.0);
        assert_eq!(settled, vec![0]);
    }

    #[test]
    fn test_looping_wraps_forward() {
        let mut engine = engine(3, true);
        assert_eq!(swipe(&mut engine, 0.6, 0.0), vec![1]);
        assert_eq!(swipe(&mut engine, 0.6, 0.0), vec![2]);
        assert_eq!(engine.progress(), 2.0);
        // Third swipe wraps to the first card
        assert_eq!(swipe(&mut engine, 0.6, 0.0), vec![0]);
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn test_looping_wraps_backward() {
        let mut engine = engine(3, true);
        assert_eq!(swipe(&mut engine, -0.6, 0.0), vec![2]);
        assert_eq!(engine.progress(), 2.0);
    }

    #[test]
    fn test_non_looping_boundary_rejects_wrap() {
        let mut engine = engine(3, false);
        // Backward from the first card: the drag pins at the boundary and the
        // release has nothing to animate
        assert_eq!(swipe(&mut engine, -0.9, 0.0), Vec::<usize>::new());
        assert_eq!(engine.progress(), 0.0);

        engine.go_to(2);
        run_to_rest(&mut engine);
        assert_eq!(swipe(&mut engine, 0.9, 0.0), Vec::<usize>::new());
        assert_eq!(engine.progress(), 2.0);

        // A hard flick past the end is rejected the same way
        assert_eq!(swipe(&mut engine, 0.0, 7.0), Vec::<usize>::new());
        assert_eq!(engine.progress(), 2.0);
    }

    #[test]
    fn test_single_card_always_settles_to_zero() {
        for looping in [true, false] {
            let mut engine = engine(1, looping);
            let settled = swipe(&mut engine, 0.9, 6.0);
            assert!(settled.iter().all(|&i| i == 0), "looping={}", looping);
            assert_eq!(engine.progress(), 0.0);
        }
    }

    #[test]
    fn test_advance_at_rest_is_noop() {
        let mut engine = engine(3, true);
        assert_eq!(engine.advance(FRAME), None);
        assert_eq!(engine.progress(), 0.0);

        // One settlement per commit, never a duplicate afterwards
        let settled = swipe(&mut engine, 0.6, 0.0);
        assert_eq!(settled.len(), 1);
        for _ in 0..10 {
            assert_eq!(engine.advance(FRAME), None);
        }
    }

    #[test]
    fn test_progress_is_monotonic_during_commit() {
        let mut engine = engine(3, true);
        engine.begin_gesture();
        engine.gesture_delta(0.6);
        engine.end_gesture(0.0);

        let mut prev = engine.progress();
        for _ in 0..200 {
            engine.advance(FRAME);
            assert!(engine.progress() >= prev - 1e-12);
            prev = engine.progress();
            if !engine.needs_update() {
                break;
            }
        }
    }

    #[test]
    fn test_new_gesture_cancels_transition_from_current_value() {
        let mut engine = engine(3, true);
        engine.begin_gesture();
        engine.gesture_delta(0.6);
        engine.end_gesture(0.0);

        // Partway through the commit...
        engine.advance(Duration::from_millis(50));
        let mid = engine.progress();
        assert!(mid > 0.0 && mid < 1.0);

        // ...a new gesture takes over exactly where the transition was
        engine.begin_gesture();
        assert!(!engine.is_animating());
        assert_eq!(engine.progress(), mid);

        engine.gesture_delta(0.01);
        engine.end_gesture(0.0);
        let settled = run_to_rest(&mut engine);
        // Snaps back to the index the cancelled commit was heading for
        assert_eq!(settled, vec![1]);
    }

    #[test]
    fn test_malformed_input_is_clamped() {
        let mut engine = engine(3, true);
        engine.begin_gesture();
        engine.gesture_delta(f64::NAN);
        engine.gesture_delta(1e12);
        engine.end_gesture(f64::INFINITY);
        let settled = run_to_rest(&mut engine);
        assert_eq!(settled, vec![1]);
        assert_eq!(engine.progress(), 1.0);
    }

    #[test]
    fn test_drag_clamps_at_non_looping_edge() {
        let mut engine = engine(3, false);
        engine.begin_gesture();
        engine.gesture_delta(-0.8);
        // Progress never leaves the valid range during the drag
        assert_eq!(engine.progress(), 0.0);
        engine.end_gesture(0.0);
        assert_eq!(run_to_rest(&mut engine), Vec::<usize>::new());
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn test_page_next_and_prev() {
        let mut engine = engine(3, true);
        engine.page_next();
        assert_eq!(run_to_rest(&mut engine), vec![1]);
        engine.page_prev();
        assert_eq!(run_to_rest(&mut engine), vec![0]);
        // Backward from the first card wraps
        engine.page_prev();
        assert_eq!(run_to_rest(&mut engine), vec![2]);
    }

    #[test]
    fn test_page_next_clamps_without_looping() {
        let mut engine = engine(2, false);
        engine.page_next();
        assert_eq!(run_to_rest(&mut engine), vec![1]);
        // Paging past the end has nothing to animate and fires nothing
        engine.page_next();
        assert_eq!(run_to_rest(&mut engine), Vec::<usize>::new());
        assert_eq!(engine.progress(), 1.0);
    }

    #[test]
    fn test_offset_of_wraps_when_looping() {
        let mut engine = engine(3, true);
        assert_eq!(engine.offset_of(0), 0.0);
        assert_eq!(engine.offset_of(1), 1.0);
        assert_eq!(engine.offset_of(2), 2.0);

        engine.go_to(2);
        run_to_rest(&mut engine);
        engine.begin_gesture();
        engine.gesture_delta(0.5);
        // progress = 2.5: card 0 is half a card ahead, card 2 scrolling out above
        assert!((engine.offset_of(0) - 0.5).abs() < 1e-9);
        assert!((engine.offset_of(1) - 1.5).abs() < 1e-9);
        assert!((engine.offset_of(2) + 0.5).abs() < 1e-9);

        engine.end_gesture(0.0);
        let settled = run_to_rest(&mut engine);
        // Committed past the end of the deck: wraps to card 0
        assert_eq!(settled, vec![0]);
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn test_offset_of_without_looping() {
        let mut engine = engine(3, false);
        engine.go_to(2);
        run_to_rest(&mut engine);
        assert_eq!(engine.offset_of(0), -2.0);
        assert_eq!(engine.offset_of(2), 0.0);
    }
}
