//! Host-side adapters for the fuzzbot controller
//!
//! ## Overview
//!
//! `fuzzbot-core` only knows the [`Robot`](fuzzbot_core::Robot) and
//! [`TickSink`] traits. This crate supplies implementations that work on a
//! desktop, without a simulator:
//!
//! - [`TraceRobot`]: replays recorded proximity readings as a robot
//! - [`ConsoleSink`]: writes the per-tick status line
//! - [`JsonLinesSink`]: records every tick as JSON for later analysis
//! - [`load_config`]: reads controller parameters and device names from JSON
//!
//! ## Example Usage
//!
//! ```no_run
//! use fuzzbot_connectors::{load_config, replay, ConsoleSink, TraceRobot};
//!
//! let file = load_config("controller.json")?;
//! let trace = std::io::BufReader::new(std::fs::File::open("corridor.jsonl")?);
//! let mut robot = TraceRobot::from_reader(trace)?;
//! let mut console = ConsoleSink::new(std::io::stdout());
//!
//! let summary = replay(&mut robot, &file, &mut console)?;
//! eprintln!("{} ticks", summary.ticks);
//! # Ok::<(), fuzzbot_connectors::ConnectorError>(())
//! ```

pub mod config;
pub mod error;
pub mod sink;
pub mod trace;

// Re-export common types
pub use config::{load_config, ControllerFile, DeviceNames};
pub use error::{ConnectorError, ConnectorResult};
pub use sink::{ConsoleSink, JsonLinesSink, TickRecord};
pub use trace::{TraceFrame, TraceRobot, DEFAULT_TIME_STEP_MS};

use fuzzbot_core::{run, ControllerState, RunSummary, TickSink};

/// Run the controller over a trace until it is exhausted
///
/// Motors named in `file` are declared on the robot first, so only the
/// sensors have to be present in the trace.
pub fn replay<S>(robot: &mut TraceRobot, file: &ControllerFile, sink: &mut S) -> ConnectorResult<RunSummary>
where
    S: TickSink + ?Sized,
{
    for motor in file.devices.motors() {
        robot.declare_motor(motor);
    }

    let mut state = ControllerState::new(file.controller)?;
    let summary = run(robot, &mut state, &file.devices.device_map(), sink)?;
    Ok(summary)
}
