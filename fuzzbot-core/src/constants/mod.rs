//! Constants for fuzzbot Core
//!
//! Centralised numeric values for the avoidance controller. Every value the
//! controller uses by default is defined here, with its unit where it has
//! one.
//!
//! ## Organization
//!
//! - **Membership**: universes and term shapes of the four fuzzy variables
//! - **Motion**: wheel speed limits and the velocity mapping parameters
//! - **Devices**: default device names on the e-puck model
//! - **Buffers**: fixed capacities of the inference engine

/// Universes and membership function shapes of the avoidance rule base.
pub mod membership;

/// Wheel speed limits and velocity mapping parameters.
pub mod motion;

/// Default device names for the simulated robot.
pub mod devices;

/// Fixed capacities for allocation-free inference.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use motion::{BASE_SPEED_RAD_S, MAX_SPEED_RAD_S, REVERSE_THRESHOLD};

pub use devices::{LEFT_MOTOR, LEFT_SENSORS, RIGHT_MOTOR, RIGHT_SENSORS};

pub use buffers::{MAX_BREAKPOINTS, MAX_RULES, MAX_TERMS_PER_VARIABLE, MAX_VARIABLES};
