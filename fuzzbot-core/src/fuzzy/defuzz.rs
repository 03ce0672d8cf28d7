//! Aggregation and defuzzification of consequent sets
//!
//! ## Output Set Construction
//!
//! Each consequent term is clipped at its activation level (Mamdani
//! implication) and the clipped sets are merged pointwise. The result is a
//! piecewise-linear function, evaluated at:
//!
//! - every universe sample
//! - every corner of an active term that lies in the universe
//! - every point where an active term's sloped edge crosses its activation
//!
//! The extra points keep the clipped plateaus exact even on a coarse
//! universe; between points the set is treated as linear.
//!
//! ## Centroid
//!
//! Each segment `[x1, x2]` with heights `y1`, `y2` is a trapezoid. Its area
//! and centre of mass are exact, so the centroid is the area-weighted mean
//! of the segment centres:
//!
//! ```text
//! area   = (x2 - x1) * (y1 + y2) / 2
//! centre = x1 + (x2 - x1) * (y1 + 2 * y2) / (3 * (y1 + y2))
//! ```
//!
//! A set with zero area has no centroid.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::buffers::MAX_BREAKPOINTS;
use crate::errors::{FuzzyError, FuzzyResult};

use super::ops::Accumulation;
use super::variable::FuzzyVariable;

/// Points closer than this fraction of a step are merged
const MERGE_FRACTION: f32 = 1e-4;

/// Heights within this of the maximum count as maximal
const MAXIMUM_TOLERANCE: f32 = 1e-6;

/// Areas below this are treated as empty
const AREA_EPSILON: f32 = 1e-12;

/// Method for turning the output set into a crisp value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Defuzzification {
    /// Centre of area
    #[default]
    Centroid,
    /// Mean of the points at maximum height
    MeanOfMaximum,
    /// First point at maximum height
    SmallestOfMaximum,
    /// Last point at maximum height
    LargestOfMaximum,
}

/// Points needed to aggregate `variable`, worst case
pub fn breakpoint_budget(variable: &FuzzyVariable) -> usize {
    // four corners and two cut points per term
    let extra = variable.terms().len().saturating_mul(6);
    variable.universe().len().saturating_add(extra)
}

/// Aggregated output set of one consequent
#[derive(Debug, Clone)]
pub struct AggregatedSet {
    points: Vec<(f32, f32), MAX_BREAKPOINTS>,
}

impl AggregatedSet {
    /// Clip every term at its activation and merge the results
    ///
    /// `activations` is indexed like `variable.terms()`.
    pub fn build(
        variable: &FuzzyVariable,
        activations: &[f32],
        accumulation: Accumulation,
    ) -> FuzzyResult<Self> {
        let universe = variable.universe();
        let (lo, hi) = (universe.min, universe.upper());
        let in_range = |x: f32| x >= lo && x <= hi;

        let mut xs: Vec<f32, MAX_BREAKPOINTS> = Vec::new();
        for x in universe.samples() {
            push_point(&mut xs, variable, x)?;
        }

        for (term, &level) in variable.terms().iter().zip(activations) {
            if level <= 0.0 {
                continue;
            }
            for corner in term.membership.corners() {
                if in_range(corner) {
                    push_point(&mut xs, variable, corner)?;
                }
            }
            for cut in term.membership.cut_points(level).into_iter().flatten() {
                if in_range(cut) {
                    push_point(&mut xs, variable, cut)?;
                }
            }
        }

        xs.sort_unstable_by(|a, b| a.total_cmp(b));

        let merge_distance = universe.step * MERGE_FRACTION;
        let mut points = Vec::new();
        let mut previous: Option<f32> = None;
        for &x in xs.iter() {
            if previous.is_some_and(|p| x - p <= merge_distance) {
                continue;
            }
            let height = implied_degree(variable, activations, accumulation, x);
            // xs and points share a capacity, so this cannot overflow
            let _ = points.push((x, height));
            previous = Some(x);
        }

        Ok(Self { points })
    }

    /// `(x, degree)` pairs in ascending `x`
    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    /// Largest degree in the set
    pub fn height(&self) -> f32 {
        self.points.iter().fold(0.0, |acc, &(_, y)| acc.max(y))
    }

    /// Crisp value by `method`, `None` for an empty set
    pub fn defuzzify(&self, method: Defuzzification) -> Option<f32> {
        match method {
            Defuzzification::Centroid => self.centroid(),
            Defuzzification::MeanOfMaximum => self.maxima().map(|(_, _, mean)| mean),
            Defuzzification::SmallestOfMaximum => self.maxima().map(|(first, _, _)| first),
            Defuzzification::LargestOfMaximum => self.maxima().map(|(_, last, _)| last),
        }
    }

    /// Centre of area
    pub fn centroid(&self) -> Option<f32> {
        let mut moment = 0.0f32;
        let mut area = 0.0f32;

        for pair in self.points.windows(2) {
            let (x1, y1) = pair[0];
            let (x2, y2) = pair[1];
            let width = x2 - x1;
            let heights = y1 + y2;
            if width <= 0.0 || heights <= 0.0 {
                continue;
            }

            let segment_area = 0.5 * width * heights;
            let centre = x1 + width * (y1 + 2.0 * y2) / (3.0 * heights);
            moment += centre * segment_area;
            area += segment_area;
        }

        if area > AREA_EPSILON {
            Some(moment / area)
        } else {
            None
        }
    }

    /// First, last and mean `x` at maximum height
    fn maxima(&self) -> Option<(f32, f32, f32)> {
        let height = self.height();
        if height <= 0.0 {
            return None;
        }

        let mut first = None;
        let mut last = 0.0;
        let mut sum = 0.0;
        let mut count = 0usize;
        for &(x, y) in self.points.iter() {
            if y >= height - MAXIMUM_TOLERANCE {
                first.get_or_insert(x);
                last = x;
                sum += x;
                count += 1;
            }
        }

        first.map(|first| (first, last, sum / count as f32))
    }
}

fn push_point(
    xs: &mut Vec<f32, MAX_BREAKPOINTS>,
    variable: &FuzzyVariable,
    x: f32,
) -> FuzzyResult<()> {
    xs.push(x).map_err(|_| FuzzyError::UniverseTooDense {
        variable: variable.name(),
        samples: breakpoint_budget(variable),
        max: MAX_BREAKPOINTS,
    })
}

/// Merged degree of the clipped term sets at `x`
fn implied_degree(
    variable: &FuzzyVariable,
    activations: &[f32],
    accumulation: Accumulation,
    x: f32,
) -> f32 {
    variable
        .terms()
        .iter()
        .zip(activations)
        .filter(|(_, level)| **level > 0.0)
        .fold(0.0, |acc, (term, &level)| {
            accumulation.apply(acc, level.min(term.membership.degree(x)))
        })
}
