//! Bubble geometry: bounds, the canonical "set geometry" operation and the
//! corner-radius heuristic. Everything here is pure so it can be tested
//! without a window.

use serde::{Deserialize, Serialize};

pub const MIN_SIZE: u32 = 100;
pub const MAX_SIZE: u32 = 500;
/// Transparent margin around the bubble (split evenly between both sides).
pub const WINDOW_PADDING: u32 = 20;
/// Smallest OS window the controller will ever apply, per axis.
pub const MIN_WINDOW: u32 = 50;

/// Inclusive size bounds for one bubble side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self { min: MIN_SIZE, max: MAX_SIZE }
    }
}

impl Bounds {
    /// Builds bounds, swapping the ends if they were given backwards.
    pub fn new(min: u32, max: u32) -> Self {
        if min <= max { Self { min, max } } else { Self { min: max, max: min } }
    }

    /// Round then clamp. `None` for NaN or infinite input.
    pub fn clamp(&self, value: f64) -> Option<u32> {
        if !value.is_finite() {
            return None;
        }
        let rounded = value.round().clamp(self.min as f64, self.max as f64);
        Some(rounded as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn square(side: u32, bounds: &Bounds) -> Self {
        Self::default_for(bounds).set(side as f64, side as f64, bounds)
    }

    fn default_for(bounds: &Bounds) -> Self {
        Self { width: bounds.min, height: bounds.min }
    }

    /// The one place a geometry changes. Invalid input leaves `self` untouched.
    pub fn set(self, width: f64, height: f64, bounds: &Bounds) -> Self {
        match (bounds.clamp(width), bounds.clamp(height)) {
            (Some(width), Some(height)) => Self { width, height },
            _ => {
                tracing::debug!(width, height, "ignoring non-finite geometry");
                self
            }
        }
    }

    pub fn longest(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Square on the larger side, as shape presets require.
    pub fn squared(self, bounds: &Bounds) -> Self {
        let side = self.longest() as f64;
        self.set(side, side, bounds)
    }

    /// Multiply both sides by `factor`.
    pub fn scaled(self, factor: f64, bounds: &Bounds) -> Self {
        self.set(self.width as f64 * factor, self.height as f64 * factor, bounds)
    }

    /// Scale proportionally so the longer side becomes `target`.
    pub fn fit_longest(self, target: u32, bounds: &Bounds) -> Self {
        let factor = target as f64 / self.longest().max(1) as f64;
        self.scaled(factor, bounds)
    }

    /// OS window size for this bubble.
    pub fn window_size(&self, padding: u32) -> (u32, u32) {
        (self.width + padding, self.height + padding)
    }
}

/// Corner radius as a percentage of each side, derived from the aspect ratio.
///
/// Square gives 50 % (a circle/ellipse), anything at 3:1 or beyond gives 5 %.
pub fn corner_radius_pct(width: f64, height: f64) -> f64 {
    let (long, short) = if width >= height { (width, height) } else { (height, width) };
    if !(long.is_finite() && short.is_finite()) || short <= 0.0 {
        return 5.0;
    }
    let aspect = long / short;
    let squareness = (1.0 - (1.0 - aspect).abs() * 0.5).clamp(0.0, 1.0);
    5.0 + 45.0 * squareness
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_bounds() {
        let b = Bounds::default();
        let g = Geometry::square(200, &b);
        assert_eq!(g.set(1.0, 200.0, &b).width, MIN_SIZE);
        assert_eq!(g.set(10_000.0, 200.0, &b).width, MAX_SIZE);
    }

    #[test]
    fn non_finite_input_keeps_previous_geometry() {
        let b = Bounds::default();
        let g = Geometry::square(240, &b);
        assert_eq!(g.set(f64::NAN, 300.0, &b), g);
        assert_eq!(g.set(300.0, f64::INFINITY, &b), g);
    }

    #[test]
    fn rounds_before_clamping() {
        let b = Bounds::default();
        let g = Geometry::square(200, &b).set(150.4, 150.6, &b);
        assert_eq!((g.width, g.height), (150, 151));
    }

    #[test]
    fn radius_stays_in_range() {
        for w in (MIN_SIZE..=MAX_SIZE).step_by(20) {
            for h in (MIN_SIZE..=MAX_SIZE).step_by(20) {
                let r = corner_radius_pct(w as f64, h as f64);
                assert!((5.0..=50.0).contains(&r), "{w}x{h} -> {r}");
            }
        }
    }

    #[test]
    fn radius_grows_toward_square() {
        let mut last = 0.0;
        for w in [500.0, 400.0, 300.0, 250.0, 220.0, 200.0] {
            let r = corner_radius_pct(w, 200.0);
            assert!(r >= last);
            last = r;
        }
        assert_eq!(corner_radius_pct(200.0, 200.0), 50.0);
        assert_eq!(corner_radius_pct(500.0, 100.0), 5.0);
    }

    #[test]
    fn squared_uses_larger_side() {
        let b = Bounds::default();
        let g = Geometry { width: 320, height: 180 }.squared(&b);
        assert_eq!((g.width, g.height), (320, 320));
    }

    #[test]
    fn fit_longest_keeps_ratio() {
        let b = Bounds::default();
        let g = Geometry { width: 300, height: 150 }.fit_longest(200, &b);
        assert_eq!((g.width, g.height), (200, 100));
    }
}
