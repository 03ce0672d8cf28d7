//! Controller configuration
//!
//! Every field has a default matching the stock e-puck avoider, so a
//! partial configuration file only needs the values it changes:
//!
//! ```json
//! { "motion": { "base_speed": 4.0 }, "fallback": "hold_last" }
//! ```
//!
//! Configuration is read once at startup. The membership shapes it carries
//! are fixed for the lifetime of the controller.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::membership::{
    GO_FORWARD_FAST, GO_FORWARD_SLOW, GO_STOP, GO_UNIVERSE, SENSOR_FAR, SENSOR_NEAR, SENSOR_UNIVERSE,
    TURN_LEFT, TURN_RIGHT, TURN_STRAIGHT, TURN_UNIVERSE,
};
use crate::constants::motion::{BASE_SPEED_RAD_S, MAX_SPEED_RAD_S, REVERSE_THRESHOLD};
use crate::errors::{ControlError, ControlResult};
use crate::fuzzy::{InferenceConfig, MembershipFn, Universe};

/// What to drive with when inference has no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallbackPolicy {
    /// `turn = 0`, `go = 0`: both wheels stop
    #[default]
    Stop,
    /// Reuse the last successful outputs; stop if there are none
    HoldLast,
}

/// Velocity mapping parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionProfile {
    /// Wheel velocity at `go = 1` with no turn (rad/s)
    pub base_speed: f32,
    /// Symmetric clamp on both wheels (rad/s)
    pub max_speed: f32,
    /// `go` below this drives both wheels in reverse without turning
    pub reverse_threshold: f32,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED_RAD_S,
            max_speed: MAX_SPEED_RAD_S,
            reverse_threshold: REVERSE_THRESHOLD,
        }
    }
}

impl MotionProfile {
    /// Reject non-finite values and non-positive speeds
    pub fn validate(&self) -> ControlResult<()> {
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(ControlError::InvalidConfig {
                reason: "base_speed must be finite and positive",
            });
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(ControlError::InvalidConfig {
                reason: "max_speed must be finite and positive",
            });
        }
        if !self.reverse_threshold.is_finite() {
            return Err(ControlError::InvalidConfig {
                reason: "reverse_threshold must be finite",
            });
        }
        Ok(())
    }
}

/// Universes of the four avoidance variables
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AvoidanceUniverses {
    /// Shared by `left` and `right`
    pub sensor: Universe,
    /// Steering output
    pub turn: Universe,
    /// Speed factor output
    pub go: Universe,
}

impl Default for AvoidanceUniverses {
    fn default() -> Self {
        Self {
            sensor: SENSOR_UNIVERSE,
            turn: TURN_UNIVERSE,
            go: GO_UNIVERSE,
        }
    }
}

/// Membership shapes of the avoidance terms
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AvoidanceTerms {
    /// `left.far` and `right.far`
    pub far: MembershipFn,
    /// `left.near` and `right.near`
    pub near: MembershipFn,
    /// `turn.left`
    pub turn_left: MembershipFn,
    /// `turn.straight`
    pub turn_straight: MembershipFn,
    /// `turn.right`
    pub turn_right: MembershipFn,
    /// `go.stop`
    pub stop: MembershipFn,
    /// `go.forward_slow`
    pub forward_slow: MembershipFn,
    /// `go.forward_fast`
    pub forward_fast: MembershipFn,
}

impl Default for AvoidanceTerms {
    fn default() -> Self {
        Self {
            far: SENSOR_FAR,
            near: SENSOR_NEAR,
            turn_left: TURN_LEFT,
            turn_straight: TURN_STRAIGHT,
            turn_right: TURN_RIGHT,
            stop: GO_STOP,
            forward_slow: GO_FORWARD_SLOW,
            forward_fast: GO_FORWARD_FAST,
        }
    }
}

impl AvoidanceTerms {
    fn all(&self) -> [MembershipFn; 8] {
        [
            self.far,
            self.near,
            self.turn_left,
            self.turn_straight,
            self.turn_right,
            self.stop,
            self.forward_slow,
            self.forward_fast,
        ]
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Velocity mapping
    pub motion: MotionProfile,
    /// Behaviour when inference fails
    pub fallback: FallbackPolicy,
    /// Fuzzy operators and defuzzification
    pub inference: InferenceConfig,
    /// Variable universes
    pub universes: AvoidanceUniverses,
    /// Term shapes
    pub terms: AvoidanceTerms,
}

impl ControllerConfig {
    /// Check every value before the controller is built
    pub fn validate(&self) -> ControlResult<()> {
        self.motion.validate()?;
        self.universes.sensor.validate()?;
        self.universes.turn.validate()?;
        self.universes.go.validate()?;
        for membership in self.terms.all() {
            membership.validate()?;
        }
        Ok(())
    }

    /// Set the base wheel speed (rad/s)
    pub fn with_base_speed(mut self, base_speed: f32) -> Self {
        self.motion.base_speed = base_speed;
        self
    }

    /// Set the wheel speed clamp (rad/s)
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.motion.max_speed = max_speed;
        self
    }

    /// Set the fallback policy
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Replace the universes
    pub fn with_universes(mut self, universes: AvoidanceUniverses) -> Self {
        self.universes = universes;
        self
    }

    /// Replace the term shapes
    pub fn with_terms(mut self, terms: AvoidanceTerms) -> Self {
        self.terms = terms;
        self
    }
}
