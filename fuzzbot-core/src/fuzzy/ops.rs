//! Fuzzy operators
//!
//! The defaults (`Min` conjunction, `Max` accumulation) are the classic
//! Mamdani choices.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// T-norm joining the antecedent clauses of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Conjunction {
    /// `min(a, b)`
    #[default]
    Min,
    /// `a * b`
    Product,
}

impl Conjunction {
    /// Combine two degrees
    pub fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            Self::Min => a.min(b),
            Self::Product => a * b,
        }
    }

    /// Fold a rule's antecedent degrees; an empty rule is fully true
    pub fn fold(self, degrees: impl IntoIterator<Item = f32>) -> f32 {
        degrees.into_iter().fold(1.0, |acc, d| self.apply(acc, d))
    }
}

/// S-norm merging activations of the same term and the clipped output sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Accumulation {
    /// `max(a, b)`
    #[default]
    Max,
    /// `a + b - a * b`
    ProbabilisticSum,
}

impl Accumulation {
    /// Combine two degrees
    pub fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            Self::Max => a.max(b),
            Self::ProbabilisticSum => a + b - a * b,
        }
    }
}
