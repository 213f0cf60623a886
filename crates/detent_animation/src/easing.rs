//! Easing curves for the entry/exit one-shots
//!
//! Curves are selectable from configuration by their snake_case name, e.g.
//! `entry_easing = "ease_out_cubic"` or
//! `exit_easing = { cubic_bezier = [0.4, 0.0, 1.0, 1.0] }`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map progress in `0.0..=1.0` onto the curve
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let x = BezierAxis::new(x1 as f64, x2 as f64);
                let y = BezierAxis::new(y1 as f64, y2 as f64);
                y.at(x.solve(t as f64)) as f32
            }
        }
    }
}

/// One axis of a cubic bezier anchored at 0 and 1, in polynomial form
#[derive(Clone, Copy)]
struct BezierAxis {
    a: f64,
    b: f64,
    c: f64,
}

impl BezierAxis {
    fn new(p1: f64, p2: f64) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    fn at(&self, s: f64) -> f64 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    fn slope(&self, s: f64) -> f64 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }

    /// Parameter `s` where this axis reaches `target`
    fn solve(&self, target: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut s = target;
        for _ in 0..8 {
            let err = self.at(s) - target;
            if err.abs() < EPSILON {
                return s;
            }
            let slope = self.slope(s);
            if slope.abs() < EPSILON {
                break;
            }
            s -= err / slope;
        }

        // Newton stalled on a flat segment; bisect instead
        let (mut lo, mut hi) = (0.0, 1.0);
        s = target;
        for _ in 0..30 {
            let value = self.at(s);
            if (value - target).abs() < EPSILON {
                break;
            }
            if value < target {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-5, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(Easing::EaseOutCubic.apply(1.5), 1.0);
        assert_eq!(Easing::EaseInCubic.apply(-0.5), 0.0);
    }

    #[test]
    fn test_ease_out_leads_ease_in() {
        assert!(Easing::EaseOutCubic.apply(0.3) > Easing::EaseInCubic.apply(0.3));
        assert!((Easing::EaseInOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_bezier_matches_linear_when_control_points_on_diagonal() {
        let bezier = Easing::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((bezier.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_bezier_approximates_ease_in_cubic_family() {
        // CSS `ease-in`: slow start, monotone
        let bezier = Easing::CubicBezier(0.42, 0.0, 1.0, 1.0);
        let mut last = 0.0;
        for i in 1..=20 {
            let v = bezier.apply(i as f32 / 20.0);
            assert!(v >= last);
            last = v;
        }
        assert!(bezier.apply(0.25) < 0.25);
    }
}
