//! Membership Function Shapes and Universes
//!
//! Sensor readings on the simulated e-puck run from roughly 60 (nothing in
//! range, ambient light only) to several thousand (touching a wall). The
//! `far` term covers the ambient plateau; `near` starts where the ambient
//! term ends and saturates well before contact.
//!
//! ```text
//!  degree
//!   1 ┤   ┌──┐        ┌───────────┐
//!     │  /    \      /             \
//!   0 ┼─┴──────┴────┴───────────────┴──────── reading
//!     0  20  60 80  200          800  1000
//!         far            near
//! ```
//!
//! The two terms touch at 80, where both degrees are zero.

use crate::fuzzy::{MembershipFn, Universe};

// ===== UNIVERSES =====

/// Sensor universe `[0, 2000)` sampled at every integer reading.
pub const SENSOR_UNIVERSE: Universe = Universe::from_parts(0.0, 2000.0, 1.0);

/// Turn universe `[-3.0, 3.0)` in 0.1 steps.
///
/// Positive values steer right, negative values steer left.
pub const TURN_UNIVERSE: Universe = Universe::from_parts(-3.0, 3.0, 0.1);

/// Go universe `[0, 1.0)` in 0.1 steps.
///
/// Fraction of the base speed; never negative with these bounds.
pub const GO_UNIVERSE: Universe = Universe::from_parts(0.0, 1.0, 0.1);

// ===== SENSOR TERMS =====

/// Nothing in range: ambient readings only.
pub const SENSOR_FAR: MembershipFn = MembershipFn::Trapezoid { a: 0.0, b: 20.0, c: 60.0, d: 80.0 };

/// Obstacle in range.
pub const SENSOR_NEAR: MembershipFn = MembershipFn::Trapezoid { a: 80.0, b: 200.0, c: 800.0, d: 1000.0 };

// ===== TURN TERMS =====

/// Steer left, peak plateau around -2.0.
pub const TURN_LEFT: MembershipFn = MembershipFn::Trapezoid { a: -2.8, b: -2.2, c: -1.8, d: -1.2 };

/// Hold course; a narrow peak at zero.
pub const TURN_STRAIGHT: MembershipFn = MembershipFn::Trapezoid { a: -0.1, b: 0.0, c: 0.0, d: 0.1 };

/// Steer right, peak plateau around 2.0.
pub const TURN_RIGHT: MembershipFn = MembershipFn::Trapezoid { a: 1.2, b: 1.8, c: 2.2, d: 2.8 };

// ===== GO TERMS =====

/// Stop in place.
pub const GO_STOP: MembershipFn = MembershipFn::Triangle { a: 0.0, b: 0.0, c: 0.2 };

/// Creep forward while turning.
pub const GO_FORWARD_SLOW: MembershipFn = MembershipFn::Triangle { a: 0.0, b: 0.2, c: 0.5 };

/// Open road.
pub const GO_FORWARD_FAST: MembershipFn = MembershipFn::Trapezoid { a: 0.3, b: 0.7, c: 1.0, d: 1.0 };

// ===== NAMES =====

/// Left sensor average input.
pub const VAR_LEFT: &str = "left";
/// Right sensor average input.
pub const VAR_RIGHT: &str = "right";
/// Steering output.
pub const VAR_TURN: &str = "turn";
/// Speed factor output.
pub const VAR_GO: &str = "go";

/// Sensor term names.
pub const TERM_FAR: &str = "far";
/// Sensor term names.
pub const TERM_NEAR: &str = "near";
/// Turn term names.
pub const TERM_LEFT: &str = "left";
/// Turn term names.
pub const TERM_STRAIGHT: &str = "straight";
/// Turn term names.
pub const TERM_RIGHT: &str = "right";
/// Go term names.
pub const TERM_STOP: &str = "stop";
/// Go term names.
pub const TERM_FORWARD_SLOW: &str = "forward_slow";
/// Go term names.
pub const TERM_FORWARD_FAST: &str = "forward_fast";
