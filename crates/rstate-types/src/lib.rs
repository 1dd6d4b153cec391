//! Leaf primitives for repaired-state bookkeeping.
//!
//! - [`Range`]: a non-wrapping `(left, right]` interval over an ordered token space.
//! - [`RangeDifference`]: the 0/1/2-piece result of subtracting one range from another.
//! - [`ranges`]: helpers over sorted, disjoint range sets (union, subtraction, coverage).
//! - [`RepairedAt`] / [`UNREPAIRED`]: repair timestamps and the "never verified" sentinel.

pub mod range;
pub mod ranges;

pub use range::{Range, RangeDifference, Token};

/// Timestamp asserting that a range was consistent as of this instant.
///
/// Larger means more recently repaired.
pub type RepairedAt = u64;

/// Sentinel returned when a range cannot be proven repaired.
pub const UNREPAIRED: RepairedAt = 0;
