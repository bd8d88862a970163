//! Pagination dot states derived from carousel progress.
//!
//! One dot per card. The dot whose index equals `round(progress)` (mod N when
//! looping) is active; active dots grow wide and bright, inactive dots shrink
//! and dim. Width and opacity approach their targets through critically
//! damped springs, so dots ease over without overshoot while the paging
//! transition itself stays time-bounded.

use std::time::Duration;

use super::spring::Spring;

/// Active dot width target (points)
pub const ACTIVE_WIDTH: f64 = 10.0;
/// Inactive dot width target (points)
pub const INACTIVE_WIDTH: f64 = 4.0;
/// Active dot opacity target
pub const ACTIVE_OPACITY: f64 = 0.8;
/// Inactive dot opacity target
pub const INACTIVE_OPACITY: f64 = 0.25;

/// Snapshot of one dot for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotState {
    pub active: bool,
    /// Eased width in points
    pub width: f64,
    /// Eased opacity in [0, 1]
    pub opacity: f64,
}

#[derive(Debug, Clone)]
struct Dot {
    width: Spring,
    opacity: Spring,
}

pub struct PaginationIndicator {
    dots: Vec<Dot>,
    active: usize,
    looping: bool,
}

impl PaginationIndicator {
    /// Create `len` dots with the given spring parameters; dot 0 starts
    /// active and at rest
    pub fn new(len: usize, looping: bool, stiffness: f64, damping: f64) -> Self {
        let dots = (0..len)
            .map(|i| {
                let (w, o) = if i == 0 {
                    (ACTIVE_WIDTH, ACTIVE_OPACITY)
                } else {
                    (INACTIVE_WIDTH, INACTIVE_OPACITY)
                };
                Dot {
                    width: Spring::new(w, stiffness, damping),
                    opacity: Spring::new(o, stiffness, damping),
                }
            })
            .collect();

        Self {
            dots,
            active: 0,
            looping,
        }
    }

    /// Number of dots
    #[inline]
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Index of the currently active dot
    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Match the engine's looping policy for active-dot rounding
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Re-derive dot targets from the current progress value
    ///
    /// Called every frame; retargeting is cheap and springs at rest on an
    /// unchanged target stay asleep.
    pub fn sync(&mut self, progress: f64) {
        let n = self.dots.len();
        if n == 0 {
            return;
        }

        let rounded = progress.round();
        self.active = if self.looping {
            (rounded.rem_euclid(n as f64) as usize) % n
        } else {
            rounded.clamp(0.0, (n - 1) as f64) as usize
        };

        for (i, dot) in self.dots.iter_mut().enumerate() {
            let (w, o) = if i == self.active {
                (ACTIVE_WIDTH, ACTIVE_OPACITY)
            } else {
                (INACTIVE_WIDTH, INACTIVE_OPACITY)
            };
            dot.width.set_target(w);
            dot.opacity.set_target(o);
        }
    }

    /// Advance all dot springs by a frame delta
    pub fn advance(&mut self, dt: Duration) {
        for dot in &mut self.dots {
            dot.width.advance(dt);
            dot.opacity.advance(dt);
        }
    }

    /// Whether any spring still has distance to cover
    pub fn needs_update(&self) -> bool {
        self.dots
            .iter()
            .any(|d| !d.width.is_at_rest() || !d.opacity.is_at_rest())
    }

    /// Snapshot of one dot
    pub fn dot(&self, index: usize) -> Option<DotState> {
        self.dots.get(index).map(|d| DotState {
            active: index == self.active,
            width: d.width.value(),
            opacity: d.opacity.value(),
        })
    }

    /// Snapshot of every dot, in order
    pub fn states(&self) -> Vec<DotState> {
        (0..self.dots.len()).filter_map(|i| self.dot(i)).collect()
    }
}
