//! Recorded sensor traces as a simulated robot
//!
//! A trace is JSON Lines: one object per timestep mapping sensor names to
//! raw readings.
//!
//! ```text
//! {"ps0": 62.1, "ps1": 70.4, "ps6": 61.0, "ps7": 58.3}
//! {"ps0": 410.0, "ps1": 522.9, "ps6": 60.2, "ps7": 57.7}
//! ```
//!
//! Every `step` advances one frame; the step after the last frame
//! terminates the run. Sensors are known if they appear in any frame.
//! A sensor absent from one frame reads as NaN for that tick, which the
//! controller treats as an invalid reading. Motors have to be declared up
//! front; every velocity they receive is recorded.

use std::collections::HashMap;
use std::io::BufRead;

use fuzzbot_core::{MotorHandle, Robot, SensorHandle, StepOutcome};

use crate::error::{ConnectorError, ConnectorResult};

/// Readings of one timestep
pub type TraceFrame = HashMap<String, f32>;

/// Basic timestep used when the trace does not say otherwise
pub const DEFAULT_TIME_STEP_MS: u32 = 32;

#[derive(Debug, Clone)]
struct MotorState {
    name: String,
    position: f32,
    velocities: Vec<f32>,
}

/// [`Robot`] that replays a recorded trace
#[derive(Debug, Clone)]
pub struct TraceRobot {
    time_step: u32,
    frames: Vec<TraceFrame>,
    cursor: Option<usize>,
    sensors: Vec<String>,
    enabled: Vec<Option<u32>>,
    motors: Vec<MotorState>,
}

impl TraceRobot {
    /// Robot over already parsed frames
    pub fn new(frames: Vec<TraceFrame>) -> Self {
        let mut sensors: Vec<String> = frames.iter().flat_map(|frame| frame.keys().cloned()).collect();
        sensors.sort();
        sensors.dedup();

        Self {
            time_step: DEFAULT_TIME_STEP_MS,
            enabled: vec![None; sensors.len()],
            frames,
            cursor: None,
            sensors,
            motors: Vec::new(),
        }
    }

    /// Parse a JSON Lines trace; blank lines are skipped
    pub fn from_reader<R: BufRead>(reader: R) -> ConnectorResult<Self> {
        let mut frames = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: TraceFrame = serde_json::from_str(&line).map_err(|source| ConnectorError::Trace {
                line: index + 1,
                source,
            })?;
            frames.push(frame);
        }

        if frames.is_empty() {
            return Err(ConnectorError::EmptyTrace);
        }
        log::debug!("Loaded trace with {} frames", frames.len());
        Ok(Self::new(frames))
    }

    /// Override the basic timestep
    pub fn with_time_step(mut self, time_step_ms: u32) -> Self {
        self.time_step = time_step_ms;
        self
    }

    /// Declare a motor so the controller can look it up
    pub fn with_motor(mut self, name: impl Into<String>) -> Self {
        self.declare_motor(name);
        self
    }

    /// Declare a motor in place; declaring twice is a no-op
    pub fn declare_motor(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.motors.iter().any(|m| m.name == name) {
            self.motors.push(MotorState {
                name,
                position: 0.0,
                velocities: Vec::new(),
            });
        }
    }

    /// Frames in the trace
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the trace has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sensor names seen anywhere in the trace, sorted
    pub fn sensor_names(&self) -> &[String] {
        &self.sensors
    }

    /// Sampling period a sensor was enabled with
    pub fn sensor_period(&self, name: &str) -> Option<u32> {
        let index = self.sensors.iter().position(|s| s == name)?;
        self.enabled[index]
    }

    /// Every velocity sent to a motor, oldest first
    pub fn velocities(&self, name: &str) -> Option<&[f32]> {
        self.motor_state(name).map(|m| m.velocities.as_slice())
    }

    /// Last position target sent to a motor
    pub fn position(&self, name: &str) -> Option<f32> {
        self.motor_state(name).map(|m| m.position)
    }

    fn motor_state(&self, name: &str) -> Option<&MotorState> {
        self.motors.iter().find(|m| m.name == name)
    }
}

impl Robot for TraceRobot {
    fn basic_time_step(&self) -> u32 {
        self.time_step
    }

    fn step(&mut self, _duration_ms: u32) -> StepOutcome {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next >= self.frames.len() {
            return StepOutcome::Terminated;
        }
        self.cursor = Some(next);
        StepOutcome::Continue
    }

    fn distance_sensor(&mut self, name: &str) -> Option<SensorHandle> {
        self.sensors
            .iter()
            .position(|s| s == name)
            .and_then(|i| u16::try_from(i).ok())
            .map(SensorHandle)
    }

    fn motor(&mut self, name: &str) -> Option<MotorHandle> {
        self.motors
            .iter()
            .position(|m| m.name == name)
            .and_then(|i| u16::try_from(i).ok())
            .map(MotorHandle)
    }

    fn enable_sensor(&mut self, sensor: SensorHandle, period_ms: u32) {
        if let Some(slot) = self.enabled.get_mut(usize::from(sensor.0)) {
            *slot = Some(period_ms);
        }
    }

    fn sensor_value(&self, sensor: SensorHandle) -> f32 {
        let reading = self.cursor.and_then(|frame| {
            let name = self.sensors.get(usize::from(sensor.0))?;
            self.frames[frame].get(name).copied()
        });
        reading.unwrap_or(f32::NAN)
    }

    fn set_motor_position(&mut self, motor: MotorHandle, position: f32) {
        if let Some(state) = self.motors.get_mut(usize::from(motor.0)) {
            state.position = position;
        }
    }

    fn set_motor_velocity(&mut self, motor: MotorHandle, velocity: f32) {
        if let Some(state) = self.motors.get_mut(usize::from(motor.0)) {
            state.velocities.push(velocity);
        }
    }
}
