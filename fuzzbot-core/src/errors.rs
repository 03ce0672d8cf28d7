//! Error Types for Fuzzy Inference and Robot Control
//!
//! ## Design Philosophy
//!
//! Errors are returned from the tick path, so they follow the same rules as
//! the rest of the hot path:
//!
//! 1. **Small Size**: `FuzzyError` only carries `&'static str` names and is
//!    `Copy`, so a tick report can hold the error that triggered a fallback.
//!
//! 2. **No Heap Allocation**: device names in `ControlError` live in a
//!    fixed-capacity `heapless::String`.
//!
//! ## Error Categories
//!
//! ### Per-tick inference failures
//! - `InvalidInput`: NaN or infinite crisp input
//! - `NoActivation`: no rule fired for a consequent, so defuzzification
//!   has nothing to integrate
//!
//! ### Construction failures
//! - `UnknownVariable` / `UnknownTerm`: a rule names something that was never
//!   declared
//! - `InvalidMembership` / `InvalidUniverse`: malformed shapes or ranges
//! - `CapacityExceeded` / `UniverseTooDense`: fixed buffers too small
//!
//! ### Startup failures
//! - `DeviceNotFound`: the host has no device with that name
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use fuzzbot_core::{ControllerConfig, ControllerState, FuzzyError};
//!
//! let controller = ControllerState::new(ControllerConfig::default()).unwrap();
//!
//! match controller.infer(80.0, 80.0) {
//!     Ok(_output) => {
//!         // Drive with _output.turn / _output.go
//!     }
//!     Err(FuzzyError::NoActivation { variable }) => {
//!         // Both readings sit exactly between "far" and "near"
//!         assert_eq!(variable, "turn");
//!     }
//!     Err(_) => {}
//! }
//! ```

use heapless::String;
use thiserror_no_std::Error;

use crate::constants::buffers::MAX_DEVICE_NAME_LEN;

/// Result type for fuzzy engine operations
pub type FuzzyResult<T> = Result<T, FuzzyError>;

/// Result type for controller and driver operations
pub type ControlResult<T> = Result<T, ControlError>;

/// Fuzzy engine errors - kept small and `Copy`
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FuzzyError {
    /// Crisp input is NaN or infinite
    #[error("Invalid input for '{variable}': not a finite number")]
    InvalidInput {
        /// Input variable that received the value
        variable: &'static str,
    },

    /// An input slot was never set before `compute`
    #[error("Missing input for '{variable}'")]
    MissingInput {
        /// Input variable left unset
        variable: &'static str,
    },

    /// Every term of a consequent has zero activation
    #[error("No rule activated '{variable}': crisp output is undefined")]
    NoActivation {
        /// Consequent that could not be defuzzified
        variable: &'static str,
    },

    /// A rule or session referenced an undeclared variable
    #[error("Unknown variable '{name}'")]
    UnknownVariable {
        /// The name that failed to resolve
        name: &'static str,
    },

    /// A rule referenced a term its variable does not declare
    #[error("Unknown term '{term}' on variable '{variable}'")]
    UnknownTerm {
        /// Variable that was searched
        variable: &'static str,
        /// The term that failed to resolve
        term: &'static str,
    },

    /// Two variables or two terms share a name
    #[error("Duplicate name '{name}'")]
    DuplicateName {
        /// The repeated name
        name: &'static str,
    },

    /// Membership corners are not finite or not ordered
    #[error("Invalid membership function: {reason}")]
    InvalidMembership {
        /// What is wrong with the corners
        reason: &'static str,
    },

    /// Universe bounds or step are unusable
    #[error("Invalid universe: {reason}")]
    InvalidUniverse {
        /// What is wrong with the range
        reason: &'static str,
    },

    /// A fixed-capacity collection is full
    #[error("Capacity exceeded: too many {what}")]
    CapacityExceeded {
        /// Which collection overflowed
        what: &'static str,
    },

    /// Consequent universe has more samples than the breakpoint buffer holds
    #[error("Universe of '{variable}' too dense: {samples} samples, max {max}")]
    UniverseTooDense {
        /// Consequent with the oversized universe
        variable: &'static str,
        /// Samples required, including corners and cut points
        samples: usize,
        /// Breakpoint capacity
        max: usize,
    },
}

/// Controller and driver errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    /// The host has no device registered under this name
    #[error("Device not found: '{name}'")]
    DeviceNotFound {
        /// Requested device name, truncated to the buffer size
        name: String<MAX_DEVICE_NAME_LEN>,
    },

    /// A configuration value is out of its valid range
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which value was rejected
        reason: &'static str,
    },

    /// Building the inference system failed
    #[error("Fuzzy system construction failed: {0}")]
    Fuzzy(#[from] FuzzyError),
}

impl ControlError {
    /// Build a `DeviceNotFound` error, truncating long names
    pub fn device_not_found(name: &str) -> Self {
        let mut truncated = String::new();
        for ch in name.chars() {
            if truncated.push(ch).is_err() {
                break;
            }
        }
        Self::DeviceNotFound { name: truncated }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FuzzyError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidInput { variable } =>
                defmt::write!(fmt, "Invalid input for {}", variable),
            Self::MissingInput { variable } =>
                defmt::write!(fmt, "Missing input for {}", variable),
            Self::NoActivation { variable } =>
                defmt::write!(fmt, "No activation for {}", variable),
            Self::UnknownVariable { name } =>
                defmt::write!(fmt, "Unknown variable {}", name),
            Self::UnknownTerm { variable, term } =>
                defmt::write!(fmt, "Unknown term {}.{}", variable, term),
            Self::DuplicateName { name } =>
                defmt::write!(fmt, "Duplicate name {}", name),
            Self::InvalidMembership { reason } =>
                defmt::write!(fmt, "Invalid membership: {}", reason),
            Self::InvalidUniverse { reason } =>
                defmt::write!(fmt, "Invalid universe: {}", reason),
            Self::CapacityExceeded { what } =>
                defmt::write!(fmt, "Too many {}", what),
            Self::UniverseTooDense { variable, samples, max } =>
                defmt::write!(fmt, "Universe {} too dense: {} > {}", variable, samples, max),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ControlError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::DeviceNotFound { name } =>
                defmt::write!(fmt, "Device not found: {}", name.as_str()),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid configuration: {}", reason),
            Self::Fuzzy(err) =>
                defmt::write!(fmt, "Fuzzy system: {}", err),
        }
    }
}
