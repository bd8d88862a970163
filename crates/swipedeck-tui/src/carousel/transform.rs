//! Per-card visual transform derived from the card's offset.
//!
//! `offset` is `card index - progress`: 0 is the centered card, positive
//! offsets recede into the stack behind it, and anything at or past -1 has
//! fully scrolled out above the viewport. Each track is a clamped
//! piecewise-linear interpolation over fixed breakpoints; the stack reads as
//! a monotonic recession (smaller, dimmer, further down, further back) as the
//! offset grows.

use super::interpolate::interpolate;

/// Stacking rank per offset; multiplied by 100 and rounded into `z_index`
const Z_POINTS: [(f64, f64); 4] = [(-1.0, 300.0), (0.0, 200.0), (1.0, 100.0), (2.0, 50.0)];

/// Vertical displacement in points; the leading -1 breakpoint is the full
/// viewport height (the card has scrolled away), substituted at call time
const TRANSLATE_POINTS: [(f64, f64); 8] = [
    (-1.0, 0.0), // placeholder, replaced with -viewport_height
    (0.0, 0.0),
    (0.1, 30.0),
    (1.0, 30.0),
    (1.1, 55.0),
    (2.0, 55.0),
    (2.1, 75.0),
    (3.0, 75.0),
];

const SCALE_POINTS: [(f64, f64); 8] = [
    (-1.0, 1.0),
    (0.0, 1.0),
    (0.1, 0.95),
    (1.0, 0.95),
    (1.1, 0.9),
    (2.0, 0.9),
    (2.1, 0.85),
    (3.0, 0.85),
];

const OPACITY_POINTS: [(f64, f64); 8] = [
    (-1.0, 1.0),
    (0.0, 1.0),
    (0.1, 0.9),
    (1.0, 0.9),
    (1.1, 0.8),
    (2.0, 0.8),
    (2.1, 0.7),
    (3.0, 0.7),
];

/// Visual transform for one card at a given offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Vertical displacement in points (negative = above the viewport)
    pub translate_y: f64,
    /// Uniform scale factor
    pub scale: f64,
    /// Opacity in [0, 1]
    pub opacity: f64,
    /// Draw-order rank; higher renders above lower
    pub z_index: i32,
}

/// Compute the transform for a card at `offset`, in a viewport
/// `viewport_height` points tall
pub fn transform(offset: f64, viewport_height: f64) -> CardTransform {
    let mut translate_points = TRANSLATE_POINTS;
    translate_points[0].1 = -viewport_height;

    CardTransform {
        translate_y: interpolate(offset, &translate_points),
        scale: interpolate(offset, &SCALE_POINTS),
        opacity: interpolate(offset, &OPACITY_POINTS),
        z_index: (interpolate(offset, &Z_POINTS) * 100.0).round() as i32,
    }
}
