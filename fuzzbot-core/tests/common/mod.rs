//! Shared fixtures for integration tests
//!
//! - `ScriptedRobot`: in-memory `Robot` that replays a list of sensor frames
//! - Assertion helpers for float outputs

#![allow(dead_code)]

use fuzzbot_core::{MotorHandle, Robot, SensorFrame, SensorHandle, StepOutcome};

/// Names the scripted robot knows about, in handle order
pub const SENSOR_NAMES: [&str; 4] = ["ps0", "ps1", "ps6", "ps7"];
pub const MOTOR_NAMES: [&str; 2] = ["left wheel motor", "right wheel motor"];

/// Robot driven by a fixed list of frames
///
/// Each successful `step` moves to the next frame. Once the frames run out
/// the next `step` terminates the simulation.
pub struct ScriptedRobot {
    pub time_step: u32,
    frames: Vec<SensorFrame>,
    cursor: Option<usize>,
    pub enabled: Vec<(SensorHandle, u32)>,
    pub positions: [f32; 2],
    pub velocities: [f32; 2],
    /// Every velocity pair after a full tick
    pub history: Vec<[f32; 2]>,
    pub missing: Vec<&'static str>,
}

impl ScriptedRobot {
    pub fn new(time_step: u32, frames: Vec<SensorFrame>) -> Self {
        Self {
            time_step,
            frames,
            cursor: None,
            enabled: Vec::new(),
            positions: [0.0; 2],
            velocities: [0.0; 2],
            history: Vec::new(),
            missing: Vec::new(),
        }
    }

    /// Same reading on all four sensors for `ticks` steps
    pub fn uniform(ticks: usize, reading: f32) -> Self {
        Self::new(32, vec![SensorFrame::new([reading; 2], [reading; 2]); ticks])
    }

    /// Hide a device from lookups
    pub fn without(mut self, name: &'static str) -> Self {
        self.missing.push(name);
        self
    }

    fn frame(&self) -> SensorFrame {
        self.cursor
            .and_then(|i| self.frames.get(i).copied())
            .unwrap_or_default()
    }
}

impl Robot for ScriptedRobot {
    fn basic_time_step(&self) -> u32 {
        self.time_step
    }

    fn step(&mut self, _duration_ms: u32) -> StepOutcome {
        if self.cursor.is_some() {
            self.history.push(self.velocities);
        }
        let next = self.cursor.map_or(0, |i| i + 1);
        if next >= self.frames.len() {
            return StepOutcome::Terminated;
        }
        self.cursor = Some(next);
        StepOutcome::Continue
    }

    fn distance_sensor(&mut self, name: &str) -> Option<SensorHandle> {
        if self.missing.iter().any(|m| *m == name) {
            return None;
        }
        SENSOR_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| SensorHandle(i as u16))
    }

    fn motor(&mut self, name: &str) -> Option<MotorHandle> {
        if self.missing.iter().any(|m| *m == name) {
            return None;
        }
        MOTOR_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| MotorHandle(i as u16))
    }

    fn enable_sensor(&mut self, sensor: SensorHandle, period_ms: u32) {
        self.enabled.push((sensor, period_ms));
    }

    fn sensor_value(&self, sensor: SensorHandle) -> f32 {
        let frame = self.frame();
        match sensor.0 {
            0 => frame.left[0],
            1 => frame.left[1],
            2 => frame.right[0],
            _ => frame.right[1],
        }
    }

    fn set_motor_position(&mut self, motor: MotorHandle, position: f32) {
        self.positions[motor.0 as usize] = position;
    }

    fn set_motor_velocity(&mut self, motor: MotorHandle, velocity: f32) {
        self.velocities[motor.0 as usize] = velocity;
    }
}

/// Assert two floats agree within a tolerance
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (actual, expected, tolerance) = ($actual as f32, $expected as f32, $tolerance as f32);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} within {} of {}",
            actual,
            tolerance,
            expected
        );
    }};
}
