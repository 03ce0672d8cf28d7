//! Fuzzy-logic obstacle avoidance for two-wheeled robots
//!
//! Reads four proximity sensors, averages them into a left and a right
//! reading, runs a four-rule Mamdani inference system and turns the inferred
//! `turn`/`go` signals into clamped differential wheel velocities.
//!
//! Key constraints:
//! - Runs inside a host-owned simulation loop (one call per timestep)
//! - No heap allocation in the tick path
//! - The inference core is free of I/O so it can be driven by synthetic data
//!
//! ```no_run
//! use fuzzbot_core::{ControllerConfig, ControllerState};
//!
//! let mut controller = ControllerState::new(ControllerConfig::default())?;
//!
//! // Obstacle close on the left, open space on the right
//! let report = controller.step(500.0, 40.0);
//! assert!(report.command.right > report.command.left);
//! println!("{report}");
//! # Ok::<(), fuzzbot_core::ControlError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod config;
pub mod constants;
pub mod controller;
pub mod driver;
pub mod errors;
pub mod fuzzy;
pub mod time;
pub mod traits;

// Public API
pub use config::{ControllerConfig, FallbackPolicy, MotionProfile};
pub use controller::{ControllerState, FuzzyOutput, MotorCommand, SensorFrame, TickReport};
pub use driver::{attach, run, DeviceMap, Rig, RunSummary};
pub use errors::{ControlError, ControlResult, FuzzyError, FuzzyResult};
pub use traits::{MotorHandle, NullSink, Robot, SensorHandle, StepOutcome, TickSink};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
