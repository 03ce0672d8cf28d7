//! Universes and linguistic variables

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::buffers::MAX_TERMS_PER_VARIABLE;
use crate::errors::{FuzzyError, FuzzyResult};

use super::membership::MembershipFn;

/// Sampled interval `[min, max)` with a fixed step
///
/// Samples are `min + i * step` for every `i` whose sample stays below
/// `max`, so `[0, 2000)` step 1 ends at 1999 and `[0, 1)` step 0.1 ends
/// at 0.9.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Universe {
    /// Inclusive lower bound
    pub min: f32,
    /// Exclusive upper bound
    pub max: f32,
    /// Distance between samples
    pub step: f32,
}

impl Universe {
    /// Checked constructor
    pub fn new(min: f32, max: f32, step: f32) -> FuzzyResult<Self> {
        let universe = Self { min, max, step };
        universe.validate()?;
        Ok(universe)
    }

    /// Unchecked constructor for constants
    pub const fn from_parts(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Reject empty, reversed or non-finite ranges
    pub fn validate(&self) -> FuzzyResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(FuzzyError::InvalidUniverse {
                reason: "bounds and step must be finite",
            });
        }
        if self.max <= self.min {
            return Err(FuzzyError::InvalidUniverse {
                reason: "max must exceed min",
            });
        }
        if self.step <= 0.0 {
            return Err(FuzzyError::InvalidUniverse {
                reason: "step must be positive",
            });
        }
        if !((self.max - self.min) / self.step).is_finite() {
            return Err(FuzzyError::InvalidUniverse {
                reason: "too many samples",
            });
        }
        Ok(())
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        let raw = (self.max - self.min) / self.step;
        let rounded = libm::roundf(raw);
        // Absorb float error so [0, 1) step 0.1 has 10 samples, not 11
        let count = if libm::fabsf(raw - rounded) < 1e-4 {
            rounded
        } else {
            libm::ceilf(raw)
        };
        count.max(1.0) as usize
    }

    /// Always false; a valid universe holds at least `min`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sample `i`
    pub fn sample(&self, i: usize) -> f32 {
        self.min + i as f32 * self.step
    }

    /// Last sample
    pub fn upper(&self) -> f32 {
        self.sample(self.len() - 1)
    }

    /// Clamp `x` onto `[min, upper]`
    pub fn clip(&self, x: f32) -> f32 {
        x.clamp(self.min, self.upper())
    }

    /// Iterate over all samples
    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len()).map(move |i| self.sample(i))
    }
}

/// Named membership function on a variable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    /// Linguistic label, e.g. `near`
    pub name: &'static str,
    /// Shape over the variable's universe
    pub membership: MembershipFn,
}

/// Linguistic variable: a universe and its terms
///
/// The same type serves antecedents and consequents; the system decides
/// the role when the variable is registered.
#[derive(Debug, Clone)]
pub struct FuzzyVariable {
    name: &'static str,
    universe: Universe,
    terms: Vec<Term, MAX_TERMS_PER_VARIABLE>,
}

impl FuzzyVariable {
    /// Create a variable with no terms
    pub fn new(name: &'static str, universe: Universe) -> FuzzyResult<Self> {
        universe.validate()?;
        Ok(Self {
            name,
            universe,
            terms: Vec::new(),
        })
    }

    /// Add a term
    pub fn with_term(mut self, name: &'static str, membership: MembershipFn) -> FuzzyResult<Self> {
        membership.validate()?;
        if self.term_index(name).is_some() {
            return Err(FuzzyError::DuplicateName { name });
        }
        self.terms
            .push(Term { name, membership })
            .map_err(|_| FuzzyError::CapacityExceeded { what: "terms" })?;
        Ok(self)
    }

    /// Variable name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Universe of discourse
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// All terms in declaration order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Position of a term by name
    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|term| term.name == name)
    }

    /// Degree of `x` in term `index`
    pub fn degree(&self, index: usize, x: f32) -> f32 {
        self.terms
            .get(index)
            .map(|term| term.membership.degree(x))
            .unwrap_or(0.0)
    }
}
