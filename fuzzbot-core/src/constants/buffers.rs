//! Buffer Sizes
//!
//! Fixed capacities of the inference engine. Everything is sized at
//! construction time so a tick never allocates.

/// Maximum input or output variables per system.
///
/// The avoidance controller uses two of each.
pub const MAX_VARIABLES: usize = 4;

/// Maximum linguistic terms per variable.
pub const MAX_TERMS_PER_VARIABLE: usize = 8;

/// Maximum rules per system.
///
/// Four are used; a full 3x3 table would need nine.
pub const MAX_RULES: usize = 16;

/// Maximum antecedent clauses per rule (one per input variable).
pub const MAX_ANTECEDENTS: usize = MAX_VARIABLES;

/// Maximum consequent assignments per rule (one per output variable).
pub const MAX_CONSEQUENTS: usize = MAX_VARIABLES;

/// Maximum points in an aggregated output set.
///
/// Covers the universe samples plus four corners and two cut points per
/// term. The default `turn` universe needs 60 + 3 * 6 = 78.
/// - 512 points × 8 bytes (x, y) = 4KB on the stack during defuzzification
pub const MAX_BREAKPOINTS: usize = 512;

/// Maximum stored length of a device name in errors.
pub const MAX_DEVICE_NAME_LEN: usize = 32;
