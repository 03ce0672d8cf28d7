//! Wheel Speed Limits
//!
//! Values for the e-puck differential drive as modelled by the simulator.
//! Velocities are wheel angular velocities in rad/s.

/// Maximum wheel angular velocity (rad/s).
///
/// One wheel revolution per second; the motor model rejects faster
/// commands.
pub const MAX_SPEED_RAD_S: f32 = 6.28;

/// Wheel velocity at `go = 1.0` with no turn (rad/s).
pub const BASE_SPEED_RAD_S: f32 = 5.0;

/// `go` values below this select the reverse regime.
///
/// In reverse both wheels get `go * base_speed` and the turn output is
/// ignored. The default `go` universe starts at 0, so the branch only runs
/// with a widened universe.
pub const REVERSE_THRESHOLD: f32 = -0.1;

/// Motor position that selects velocity control mode.
pub const VELOCITY_MODE_POSITION: f32 = f32::INFINITY;
