//! Fuzzy Avoidance Controller
//!
//! ## Rule Base
//!
//! Two inputs (`left`, `right`: averaged proximity readings) and two outputs
//! (`turn`, `go`) joined by four rules:
//!
//! ```text
//! left   right  │ turn      go
//! ──────────────┼─────────────────────
//! far    far    │ straight  forward_fast
//! near   far    │ right     forward_slow
//! far    near   │ left      forward_slow
//! near   near   │ left      stop
//! ```
//!
//! An obstacle on the left steers right and vice versa; boxed in, the robot
//! slows to a stop while still turning left.
//!
//! ## Velocity Mapping
//!
//! ```text
//! go < reverse_threshold:  left = right = go * base_speed
//! otherwise:               left  = go * base_speed * (1 - turn)
//!                          right = go * base_speed * (1 + turn)
//! ```
//!
//! then both wheels are clamped to `±max_speed`. The reverse branch cannot
//! run with the default `go` universe (it starts at 0) and exists for
//! universes that extend below zero.
//!
//! ## Gaps in the Rule Base
//!
//! The rules only cover the four pure combinations. Inputs where no rule
//! fires (a reading of exactly 80, readings at 0 or beyond 1000 after
//! clipping) have no defined output. The controller then applies its
//! [`FallbackPolicy`] and flags the tick.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{ControllerConfig, FallbackPolicy, MotionProfile};
use crate::constants::membership::{
    TERM_FAR, TERM_FORWARD_FAST, TERM_FORWARD_SLOW, TERM_LEFT, TERM_NEAR, TERM_RIGHT, TERM_STOP,
    TERM_STRAIGHT, VAR_GO, VAR_LEFT, VAR_RIGHT, VAR_TURN,
};
use crate::errors::{ControlResult, FuzzyError, FuzzyResult};
use crate::fuzzy::{FuzzySystem, FuzzyVariable};
use crate::time::Timestamp;

/// Defuzzified controller outputs
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FuzzyOutput {
    /// Steering, positive to the right
    pub turn: f32,
    /// Speed factor
    pub go: f32,
}

impl FuzzyOutput {
    /// Output that stops both wheels
    pub const STOP: Self = Self { turn: 0.0, go: 0.0 };
}

/// Wheel velocities in rad/s
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorCommand {
    /// Left wheel
    pub left: f32,
    /// Right wheel
    pub right: f32,
}

impl MotorCommand {
    /// Clamp both wheels to `±max_speed`
    ///
    /// A NaN or negative limit clamps to zero.
    pub fn clamped(self, max_speed: f32) -> Self {
        let limit = if max_speed > 0.0 { max_speed } else { 0.0 };
        Self {
            left: self.left.clamp(-limit, limit),
            right: self.right.clamp(-limit, limit),
        }
    }
}

/// Four proximity readings of one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorFrame {
    /// Readings averaged into the `left` input
    pub left: [f32; 2],
    /// Readings averaged into the `right` input
    pub right: [f32; 2],
}

impl SensorFrame {
    /// Frame from the left and right pairs
    pub fn new(left: [f32; 2], right: [f32; 2]) -> Self {
        Self { left, right }
    }

    /// Mean of the left pair
    pub fn left_average(&self) -> f32 {
        (self.left[0] + self.left[1]) / 2.0
    }

    /// Mean of the right pair
    pub fn right_average(&self) -> f32 {
        (self.right[0] + self.right[1]) / 2.0
    }
}

/// Everything the controller decided in one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Simulated time of the tick
    pub timestamp: Timestamp,
    /// Averaged left reading fed to inference
    pub left_input: f32,
    /// Averaged right reading fed to inference
    pub right_input: f32,
    /// Outputs actually used (the fallback's if inference failed)
    pub output: FuzzyOutput,
    /// Clamped wheel velocities
    pub command: MotorCommand,
    /// Why the fallback was used, if it was
    pub fallback: Option<FuzzyError>,
}

impl TickReport {
    /// Whether the fallback policy produced this tick
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Left_Sensor: {:.2}, Right_Sensor: {:.2}, Turn_Output: {:.2}, Go_Output: {:.2}",
            self.left_input, self.right_input, self.output.turn, self.output.go
        )
    }
}

impl MotionProfile {
    /// Map fuzzy outputs onto clamped wheel velocities
    pub fn wheel_speeds(&self, output: FuzzyOutput) -> MotorCommand {
        let FuzzyOutput { turn, go } = output;
        let forward = go * self.base_speed;

        let raw = if go < self.reverse_threshold {
            MotorCommand { left: forward, right: forward }
        } else {
            MotorCommand {
                left: forward * (1.0 - turn),
                right: forward * (1.0 + turn),
            }
        };

        raw.clamped(self.max_speed)
    }
}

/// Build the four-rule avoidance system from a configuration
pub fn avoidance_system(config: &ControllerConfig) -> FuzzyResult<FuzzySystem> {
    let universes = &config.universes;
    let terms = &config.terms;

    let left = FuzzyVariable::new(VAR_LEFT, universes.sensor)?
        .with_term(TERM_FAR, terms.far)?
        .with_term(TERM_NEAR, terms.near)?;
    let right = FuzzyVariable::new(VAR_RIGHT, universes.sensor)?
        .with_term(TERM_FAR, terms.far)?
        .with_term(TERM_NEAR, terms.near)?;
    let turn = FuzzyVariable::new(VAR_TURN, universes.turn)?
        .with_term(TERM_LEFT, terms.turn_left)?
        .with_term(TERM_STRAIGHT, terms.turn_straight)?
        .with_term(TERM_RIGHT, terms.turn_right)?;
    let go = FuzzyVariable::new(VAR_GO, universes.go)?
        .with_term(TERM_STOP, terms.stop)?
        .with_term(TERM_FORWARD_SLOW, terms.forward_slow)?
        .with_term(TERM_FORWARD_FAST, terms.forward_fast)?;

    FuzzySystem::builder()
        .input(left)
        .input(right)
        .output(turn)
        .output(go)
        .config(config.inference)
        .rule(
            &[(VAR_LEFT, TERM_FAR), (VAR_RIGHT, TERM_FAR)],
            &[(VAR_TURN, TERM_STRAIGHT), (VAR_GO, TERM_FORWARD_FAST)],
        )
        .rule(
            &[(VAR_LEFT, TERM_NEAR), (VAR_RIGHT, TERM_FAR)],
            &[(VAR_TURN, TERM_RIGHT), (VAR_GO, TERM_FORWARD_SLOW)],
        )
        .rule(
            &[(VAR_LEFT, TERM_FAR), (VAR_RIGHT, TERM_NEAR)],
            &[(VAR_TURN, TERM_LEFT), (VAR_GO, TERM_FORWARD_SLOW)],
        )
        .rule(
            &[(VAR_LEFT, TERM_NEAR), (VAR_RIGHT, TERM_NEAR)],
            &[(VAR_TURN, TERM_LEFT), (VAR_GO, TERM_STOP)],
        )
        .build()
}

/// Controller state: the inference system plus its constants
///
/// Built once at startup. The only value carried between ticks is the last
/// successful output, and it is only read under
/// [`FallbackPolicy::HoldLast`].
#[derive(Debug, Clone)]
pub struct ControllerState {
    system: FuzzySystem,
    config: ControllerConfig,
    last_output: Option<FuzzyOutput>,
    clock: Timestamp,
}

impl ControllerState {
    /// Validate the configuration and build the rule base
    pub fn new(config: ControllerConfig) -> ControlResult<Self> {
        config.validate()?;
        let system = avoidance_system(&config)?;

        log_debug!(
            "Avoidance rule base ready: {} rules, fallback {:?}",
            system.rules().len(),
            config.fallback
        );

        Ok(Self {
            system,
            config,
            last_output: None,
            clock: 0,
        })
    }

    /// Run inference only, without touching state
    pub fn infer(&self, left: f32, right: f32) -> FuzzyResult<FuzzyOutput> {
        let mut session = self.system.session();
        session.set_input(VAR_LEFT, left)?;
        session.set_input(VAR_RIGHT, right)?;
        session.compute()?;

        let turn = session.output(VAR_TURN).ok_or(FuzzyError::NoActivation { variable: VAR_TURN })?;
        let go = session.output(VAR_GO).ok_or(FuzzyError::NoActivation { variable: VAR_GO })?;
        Ok(FuzzyOutput { turn, go })
    }

    /// One control tick on averaged readings
    pub fn step(&mut self, left: f32, right: f32) -> TickReport {
        let (output, fallback) = match self.infer(left, right) {
            Ok(output) => {
                self.last_output = Some(output);
                (output, None)
            }
            Err(err) => {
                let output = self.fallback_output();
                log_warn!(
                    "Inference failed for left={:.2} right={:.2}: {}; applying {:?} fallback",
                    left,
                    right,
                    err,
                    self.config.fallback
                );
                (output, Some(err))
            }
        };

        TickReport {
            timestamp: self.clock,
            left_input: left,
            right_input: right,
            output,
            command: self.config.motion.wheel_speeds(output),
            fallback,
        }
    }

    /// One control tick on a raw sensor frame
    pub fn step_frame(&mut self, frame: &SensorFrame) -> TickReport {
        self.step(frame.left_average(), frame.right_average())
    }

    /// Stamp subsequent reports with this simulated time
    pub fn set_time(&mut self, now: Timestamp) {
        self.clock = now;
    }

    /// Forget the held output
    pub fn reset(&mut self) {
        self.last_output = None;
    }

    fn fallback_output(&self) -> FuzzyOutput {
        match self.config.fallback {
            FallbackPolicy::Stop => FuzzyOutput::STOP,
            FallbackPolicy::HoldLast => self.last_output.unwrap_or(FuzzyOutput::STOP),
        }
    }
}
