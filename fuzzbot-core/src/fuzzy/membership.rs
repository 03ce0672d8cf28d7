//! Triangular and trapezoidal membership functions
//!
//! A trapezoid `(a, b, c, d)` is 0 outside `[a, d]`, rises linearly on
//! `[a, b]`, is 1 on `[b, c]` and falls linearly on `[c, d]`. A triangle
//! `(a, b, c)` is the trapezoid `(a, b, b, c)`.
//!
//! Degenerate edges are vertical: with `a == b` the degree at `b` is 1 and
//! with `c == d` the degree at `c` is 1. So `Triangle { a: 0, b: 0, c: 0.2 }`
//! is fully true at zero.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{FuzzyError, FuzzyResult};

/// Piecewise-linear membership function
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum MembershipFn {
    /// Triangle with feet `a`, `c` and peak `b`
    Triangle {
        /// Left foot
        a: f32,
        /// Peak
        b: f32,
        /// Right foot
        c: f32,
    },
    /// Trapezoid with feet `a`, `d` and plateau `[b, c]`
    Trapezoid {
        /// Left foot
        a: f32,
        /// Plateau start
        b: f32,
        /// Plateau end
        c: f32,
        /// Right foot
        d: f32,
    },
}

impl MembershipFn {
    /// Checked triangle constructor
    pub fn triangle(a: f32, b: f32, c: f32) -> FuzzyResult<Self> {
        let mf = Self::Triangle { a, b, c };
        mf.validate()?;
        Ok(mf)
    }

    /// Checked trapezoid constructor
    pub fn trapezoid(a: f32, b: f32, c: f32, d: f32) -> FuzzyResult<Self> {
        let mf = Self::Trapezoid { a, b, c, d };
        mf.validate()?;
        Ok(mf)
    }

    /// Corners as a trapezoid `[a, b, c, d]`
    pub const fn corners(&self) -> [f32; 4] {
        match *self {
            Self::Triangle { a, b, c } => [a, b, b, c],
            Self::Trapezoid { a, b, c, d } => [a, b, c, d],
        }
    }

    /// Reject non-finite or unordered corners
    pub fn validate(&self) -> FuzzyResult<()> {
        let [a, b, c, d] = self.corners();
        if !(a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite()) {
            return Err(FuzzyError::InvalidMembership {
                reason: "corners must be finite",
            });
        }
        if !(a <= b && b <= c && c <= d) {
            return Err(FuzzyError::InvalidMembership {
                reason: "corners must be non-decreasing",
            });
        }
        Ok(())
    }

    /// Degree of membership of `x`, in `[0, 1]`
    pub fn degree(&self, x: f32) -> f32 {
        let [a, b, c, d] = self.corners();

        if x < a || x > d {
            0.0
        } else if x < b {
            // a <= x < b, so b > a
            (x - a) / (b - a)
        } else if x <= c {
            1.0
        } else if x < d {
            (d - x) / (d - c)
        } else {
            // x == d with c < d
            0.0
        }
    }

    /// Points where the sloped edges cross `level`
    ///
    /// Returns the rising-edge crossing first. Vertical edges and levels
    /// outside `(0, 1)` have no crossing.
    pub fn cut_points(&self, level: f32) -> [Option<f32>; 2] {
        if !(level > 0.0 && level < 1.0) {
            return [None, None];
        }

        let [a, b, c, d] = self.corners();
        let rising = (b > a).then(|| a + level * (b - a));
        let falling = (d > c).then(|| d - level * (d - c));
        [rising, falling]
    }
}
