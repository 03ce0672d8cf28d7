//! Device Names
//!
//! Default device names of the e-puck robot model. The eight infrared
//! proximity sensors are `ps0`..`ps7`; the controller uses the two front
//! pairs.

/// Sensors averaged into the `left` input.
pub const LEFT_SENSORS: [&str; 2] = ["ps0", "ps1"];

/// Sensors averaged into the `right` input.
pub const RIGHT_SENSORS: [&str; 2] = ["ps6", "ps7"];

/// Left wheel actuator.
pub const LEFT_MOTOR: &str = "left wheel motor";

/// Right wheel actuator.
pub const RIGHT_MOTOR: &str = "right wheel motor";
