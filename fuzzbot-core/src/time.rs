//! Simulation time
//!
//! The host owns the clock: every `Robot::step` advances simulated time by
//! one basic timestep. The controller only counts those steps to stamp its
//! tick reports.

/// Simulated time in milliseconds since the controller attached
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// Clock advanced by whole simulation steps
///
/// Starts at 0 when the controller attaches and moves forward by the
/// basic timestep on every successful step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    time_step_ms: u32,
    elapsed_ms: Timestamp,
    steps: u64,
}

impl SimulationClock {
    /// Clock for a host with the given basic timestep
    pub fn new(time_step_ms: u32) -> Self {
        Self {
            time_step_ms,
            elapsed_ms: 0,
            steps: 0,
        }
    }

    /// Record one completed step
    pub fn advance(&mut self) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(Timestamp::from(self.time_step_ms));
        self.steps += 1;
    }

    /// Completed steps
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl TimeSource for SimulationClock {
    fn now(&self) -> Timestamp {
        self.elapsed_ms
    }
}
