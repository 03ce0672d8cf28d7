//! Simulation driver
//!
//! Binds a [`ControllerState`] to a [`Robot`]: [`attach`] resolves and
//! prepares the devices once, [`run`] then loops one control tick per basic
//! timestep until the host terminates the simulation.
//!
//! ```text
//! attach ──► step(timestep) ──► read 4 sensors ──► step_frame ──► set velocities ──► sink
//!                 ▲                                                                   │
//!                 └───────────────────────────────────────────────────────────────────┘
//! ```

use crate::constants::devices::{LEFT_MOTOR, LEFT_SENSORS, RIGHT_MOTOR, RIGHT_SENSORS};
use crate::constants::motion::VELOCITY_MODE_POSITION;
use crate::controller::{ControllerState, SensorFrame};
use crate::errors::{ControlError, ControlResult};
use crate::time::{SimulationClock, TimeSource, Timestamp};
use crate::traits::{MotorHandle, Robot, SensorHandle, StepOutcome, TickSink};

/// Device names the controller looks up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceMap<'a> {
    /// Sensors averaged into the `left` input
    pub left_sensors: [&'a str; 2],
    /// Sensors averaged into the `right` input
    pub right_sensors: [&'a str; 2],
    /// Left wheel motor
    pub left_motor: &'a str,
    /// Right wheel motor
    pub right_motor: &'a str,
}

impl Default for DeviceMap<'static> {
    fn default() -> Self {
        Self {
            left_sensors: LEFT_SENSORS,
            right_sensors: RIGHT_SENSORS,
            left_motor: LEFT_MOTOR,
            right_motor: RIGHT_MOTOR,
        }
    }
}

impl<'a> DeviceMap<'a> {
    fn sensor_names(&self) -> [&'a str; 4] {
        [
            self.left_sensors[0],
            self.left_sensors[1],
            self.right_sensors[0],
            self.right_sensors[1],
        ]
    }
}

/// Resolved and initialised devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rig {
    /// Left pair then right pair
    pub sensors: [SensorHandle; 4],
    /// Left wheel motor
    pub left_motor: MotorHandle,
    /// Right wheel motor
    pub right_motor: MotorHandle,
    /// Basic timestep in milliseconds
    pub time_step: u32,
}

impl Rig {
    /// Read all four sensors into a frame
    pub fn read_frame<R: Robot + ?Sized>(&self, robot: &R) -> SensorFrame {
        let [l0, l1, r0, r1] = self.sensors.map(|sensor| robot.sensor_value(sensor));
        SensorFrame::new([l0, l1], [r0, r1])
    }
}

/// Totals of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Control ticks executed
    pub ticks: u64,
    /// Ticks driven by the fallback policy
    pub fallback_ticks: u64,
    /// Simulated time covered
    pub elapsed_ms: Timestamp,
}

/// Resolve every device and put the robot in a known state
///
/// Sensors are enabled with the basic timestep as sampling period. Both
/// motors switch to velocity control and start at rest. A missing device is
/// fatal.
pub fn attach<R: Robot + ?Sized>(robot: &mut R, devices: &DeviceMap<'_>) -> ControlResult<Rig> {
    let time_step = robot.basic_time_step();
    if time_step == 0 {
        return Err(ControlError::InvalidConfig {
            reason: "basic timestep must be positive",
        });
    }

    let names = devices.sensor_names();
    let mut sensors = [SensorHandle(0); 4];
    for (slot, name) in sensors.iter_mut().zip(names) {
        *slot = robot
            .distance_sensor(name)
            .ok_or_else(|| ControlError::device_not_found(name))?;
    }

    let left_motor = robot
        .motor(devices.left_motor)
        .ok_or_else(|| ControlError::device_not_found(devices.left_motor))?;
    let right_motor = robot
        .motor(devices.right_motor)
        .ok_or_else(|| ControlError::device_not_found(devices.right_motor))?;

    for sensor in sensors {
        robot.enable_sensor(sensor, time_step);
    }
    for motor in [left_motor, right_motor] {
        robot.set_motor_position(motor, VELOCITY_MODE_POSITION);
        robot.set_motor_velocity(motor, 0.0);
    }

    log_info!(
        "Attached {} sensors and 2 motors, timestep {} ms",
        sensors.len(),
        time_step
    );

    Ok(Rig {
        sensors,
        left_motor,
        right_motor,
        time_step,
    })
}

/// Control loop: one tick per timestep until the host terminates
pub fn run<R, S>(
    robot: &mut R,
    state: &mut ControllerState,
    devices: &DeviceMap<'_>,
    sink: &mut S,
) -> ControlResult<RunSummary>
where
    R: Robot + ?Sized,
    S: TickSink + ?Sized,
{
    let rig = attach(robot, devices)?;
    let mut clock = SimulationClock::new(rig.time_step);
    let mut summary = RunSummary::default();

    while robot.step(rig.time_step) == StepOutcome::Continue {
        clock.advance();
        state.set_time(clock.now());

        let frame = rig.read_frame(robot);
        let report = state.step_frame(&frame);

        robot.set_motor_velocity(rig.left_motor, report.command.left);
        robot.set_motor_velocity(rig.right_motor, report.command.right);

        log_info!("{}", report);
        sink.record(&report);

        if report.is_fallback() {
            summary.fallback_ticks += 1;
        }
    }

    summary.ticks = clock.steps();
    summary.elapsed_ms = clock.now();
    log_info!(
        "Simulation terminated after {} ticks ({} fallback, {} ms)",
        summary.ticks,
        summary.fallback_ticks,
        summary.elapsed_ms
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use crate::controller::TickReport;
    use crate::traits::NullSink;

    struct Bench {
        steps_left: u32,
        reading: f32,
        enabled: [u32; 4],
        velocities: [f32; 2],
        positions: [f32; 2],
    }

    impl Robot for Bench {
        fn basic_time_step(&self) -> u32 {
            16
        }

        fn step(&mut self, _duration_ms: u32) -> StepOutcome {
            if self.steps_left == 0 {
                return StepOutcome::Terminated;
            }
            self.steps_left -= 1;
            StepOutcome::Continue
        }

        fn distance_sensor(&mut self, name: &str) -> Option<SensorHandle> {
            ["ps0", "ps1", "ps6", "ps7"]
                .iter()
                .position(|n| *n == name)
                .map(|i| SensorHandle(i as u16))
        }

        fn motor(&mut self, name: &str) -> Option<MotorHandle> {
            match name {
                "left wheel motor" => Some(MotorHandle(0)),
                "right wheel motor" => Some(MotorHandle(1)),
                _ => None,
            }
        }

        fn enable_sensor(&mut self, sensor: SensorHandle, period_ms: u32) {
            self.enabled[sensor.0 as usize] = period_ms;
        }

        fn sensor_value(&self, _sensor: SensorHandle) -> f32 {
            self.reading
        }

        fn set_motor_position(&mut self, motor: MotorHandle, position: f32) {
            self.positions[motor.0 as usize] = position;
        }

        fn set_motor_velocity(&mut self, motor: MotorHandle, velocity: f32) {
            self.velocities[motor.0 as usize] = velocity;
        }
    }

    fn bench(steps: u32, reading: f32) -> Bench {
        Bench {
            steps_left: steps,
            reading,
            enabled: [0; 4],
            velocities: [f32::NAN; 2],
            positions: [0.0; 2],
        }
    }

    #[test]
    fn attach_prepares_devices() {
        let mut robot = bench(0, 40.0);
        let rig = attach(&mut robot, &DeviceMap::default()).unwrap();

        assert_eq!(rig.time_step, 16);
        assert_eq!(robot.enabled, [16; 4]);
        assert_eq!(robot.positions, [f32::INFINITY; 2]);
        assert_eq!(robot.velocities, [0.0; 2]);
    }

    #[test]
    fn attach_reports_missing_device() {
        let mut robot = bench(0, 40.0);
        let devices = DeviceMap {
            right_motor: "rear wheel motor",
            ..DeviceMap::default()
        };

        assert_eq!(
            attach(&mut robot, &devices),
            Err(ControlError::device_not_found("rear wheel motor"))
        );
    }

    #[test]
    fn run_counts_ticks_and_time() {
        let mut robot = bench(5, 40.0);
        let mut state = ControllerState::new(ControllerConfig::default()).unwrap();
        let mut seen = 0u32;

        let mut count = |_: &TickReport| seen += 1;
        let summary = run(&mut robot, &mut state, &DeviceMap::default(), &mut count).unwrap();

        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.fallback_ticks, 0);
        assert_eq!(summary.elapsed_ms, 80);
        drop(count);
        assert_eq!(seen, 5);
        assert!(robot.velocities[0] > 3.0);
        assert!((robot.velocities[0] - robot.velocities[1]).abs() < 1e-3);
    }

    #[test]
    fn run_counts_fallback_ticks() {
        let mut robot = bench(3, 80.0);
        let mut state = ControllerState::new(ControllerConfig::default()).unwrap();

        let summary = run(&mut robot, &mut state, &DeviceMap::default(), &mut NullSink).unwrap();

        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.fallback_ticks, 3);
        assert_eq!(robot.velocities, [0.0; 2]);
    }
}
