//! Mamdani Fuzzy Inference
//!
//! ## Overview
//!
//! A small fuzzy engine sized for one controller: a handful of variables,
//! piecewise-linear terms and a short rule table, all held in fixed-size
//! buffers.
//!
//! ## Inference Steps
//!
//! ```text
//! crisp inputs ──► clip to universe ──► fuzzify (term degrees)
//!                                            │
//!                     rule strength = AND of antecedent degrees
//!                                            │
//!           term activation = OR of strengths of rules naming the term
//!                                            │
//!        clip each term at its activation, merge ──► defuzzify ──► crisp outputs
//! ```
//!
//! With the defaults AND is `min`, OR is `max` and defuzzification is the
//! centroid.
//!
//! ## Undefined Outputs
//!
//! When every term of a consequent has zero activation there is no area to
//! take the centroid of. `infer` reports this as
//! [`FuzzyError::NoActivation`](crate::errors::FuzzyError::NoActivation)
//! rather than guessing; the caller picks the fallback.
//!
//! ## Usage Example
//!
//! ```rust
//! use fuzzbot_core::fuzzy::{FuzzySystem, FuzzyVariable, MembershipFn, Universe};
//!
//! let error = FuzzyVariable::new("error", Universe::new(-10.0, 10.0, 0.5)?)?
//!     .with_term("negative", MembershipFn::trapezoid(-10.0, -10.0, -5.0, 0.0)?)?
//!     .with_term("positive", MembershipFn::trapezoid(0.0, 5.0, 10.0, 10.0)?)?;
//! let effort = FuzzyVariable::new("effort", Universe::new(-1.0, 1.0, 0.1)?)?
//!     .with_term("push", MembershipFn::triangle(0.0, 0.5, 1.0)?)?
//!     .with_term("pull", MembershipFn::triangle(-1.0, -0.5, 0.0)?)?;
//!
//! let system = FuzzySystem::builder()
//!     .input(error)
//!     .output(effort)
//!     .rule(&[("error", "negative")], &[("effort", "push")])
//!     .rule(&[("error", "positive")], &[("effort", "pull")])
//!     .build()?;
//!
//! let mut session = system.session();
//! session.set_input("error", -7.5)?;
//! session.compute()?;
//! assert!(session.output("effort").unwrap() > 0.0);
//! # Ok::<(), fuzzbot_core::FuzzyError>(())
//! ```

mod defuzz;
mod membership;
mod ops;
mod rule;
mod session;
mod system;
mod variable;

pub use defuzz::{breakpoint_budget, AggregatedSet, Defuzzification};
pub use membership::MembershipFn;
pub use ops::{Accumulation, Conjunction};
pub use rule::{Clause, Rule, RuleDecl, TermRef};
pub use session::InferenceSession;
pub use system::{CrispValues, FuzzySystem, FuzzySystemBuilder, InferenceConfig};
pub use variable::{FuzzyVariable, Term, Universe};
