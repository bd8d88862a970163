//! Clamped piecewise-linear interpolation over sorted breakpoints.
//!
//! One helper shared by every visual track (translate, scale, opacity,
//! stacking) and by the widgets. Inputs outside the breakpoint domain clamp
//! to the edge value; there is no extrapolation.

use super::timing::lerp;

/// Interpolate `value` over `points`, a slice of `(input, output)` pairs
/// sorted by ascending input.
///
/// Between adjacent breakpoints the output is linear; outside the domain it
/// clamps to the first/last output. Non-finite input clamps to the first
/// breakpoint.
pub fn interpolate(value: f64, points: &[(f64, f64)]) -> f64 {
    debug_assert!(points.len() >= 2, "need at least two breakpoints");
    debug_assert!(
        points.windows(2).all(|w| w[0].0 <= w[1].0),
        "breakpoints must be sorted"
    );

    let (first_in, first_out) = points[0];
    let (last_in, last_out) = points[points.len() - 1];

    if !value.is_finite() || value <= first_in {
        return first_out;
    }
    if value >= last_in {
        return last_out;
    }

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if value <= x1 {
            if x1 == x0 {
                return y1;
            }
            let t = (value - x0) / (x1 - x0);
            return lerp(y0, y1, t);
        }
    }

    last_out
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: [(f64, f64); 4] = [(-1.0, 300.0), (0.0, 200.0), (1.0, 100.0), (2.0, 50.0)];

    #[test]
    fn test_exact_breakpoints() {
        assert!((interpolate(-1.0, &POINTS) - 300.0).abs() < 1e-9);
        assert!((interpolate(0.0, &POINTS) - 200.0).abs() < 1e-9);
        assert!((interpolate(2.0, &POINTS) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_between_breakpoints() {
        assert!((interpolate(0.5, &POINTS) - 150.0).abs() < 1e-9);
        assert!((interpolate(1.5, &POINTS) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_outside_domain() {
        assert!((interpolate(-10.0, &POINTS) - 300.0).abs() < 1e-9);
        assert!((interpolate(10.0, &POINTS) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_input_clamps() {
        assert!((interpolate(f64::NAN, &POINTS) - 300.0).abs() < 1e-9);
        assert!((interpolate(f64::INFINITY, &POINTS) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_breakpoint_steps() {
        // A zero-width segment acts as a step
        let step = [(0.0, 0.0), (1.0, 0.0), (1.0, 10.0), (2.0, 10.0)];
        assert!((interpolate(0.5, &step) - 0.0).abs() < 1e-9);
        assert!((interpolate(1.5, &step) - 10.0).abs() < 1e-9);
    }
}
