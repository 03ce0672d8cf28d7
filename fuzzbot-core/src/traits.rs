//! Host simulator interface
//!
//! The controller never talks to a simulator directly. Anything that can
//! hand out device handles, read proximity sensors, set wheel velocities and
//! advance time by one basic timestep implements [`Robot`]. Keep it small;
//! it mirrors the handful of calls a controller actually makes.

use crate::controller::TickReport;

/// Opaque handle to a distance sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorHandle(pub u16);

/// Opaque handle to a wheel motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotorHandle(pub u16);

/// Result of advancing the simulation one timestep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Simulation advanced; keep controlling
    Continue,
    /// Host asked the controller to stop
    Terminated,
}

/// Simulated robot as seen from the controller
pub trait Robot {
    /// Basic simulation timestep in milliseconds
    fn basic_time_step(&self) -> u32;

    /// Advance the simulation by `duration_ms`
    fn step(&mut self, duration_ms: u32) -> StepOutcome;

    /// Look up a distance sensor by device name
    fn distance_sensor(&mut self, name: &str) -> Option<SensorHandle>;

    /// Look up a wheel motor by device name
    fn motor(&mut self, name: &str) -> Option<MotorHandle>;

    /// Start sampling a sensor every `period_ms`
    fn enable_sensor(&mut self, sensor: SensorHandle, period_ms: u32);

    /// Latest raw reading of a sensor
    fn sensor_value(&self, sensor: SensorHandle) -> f32;

    /// Set the motor target position (`f32::INFINITY` for velocity control)
    fn set_motor_position(&mut self, motor: MotorHandle, position: f32);

    /// Set the motor angular velocity in rad/s
    fn set_motor_velocity(&mut self, motor: MotorHandle, velocity: f32);
}

/// Consumer of per-tick reports
pub trait TickSink {
    /// Called once per tick, after the wheel velocities are applied
    fn record(&mut self, report: &TickReport);
}

/// Sink that drops every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TickSink for NullSink {
    fn record(&mut self, _report: &TickReport) {}
}

impl<F> TickSink for F
where
    F: FnMut(&TickReport),
{
    fn record(&mut self, report: &TickReport) {
        self(report)
    }
}
