//! Error types shared by every `rstate-*` crate.
//!
//! Endpoints are carried as pre-rendered strings so the error stays
//! independent of the concrete token type a caller plugs in.

use std::fmt::Debug;

/// Errors produced while building or updating repaired-state bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepairStateError {
    /// The left endpoint is not strictly below the right one.
    ///
    /// Only normalized, non-wrapping `(left, right]` ranges are accepted.
    #[error("invalid range ({left},{right}]: left must be strictly below right")]
    InvalidRange { left: String, right: String },

    /// A level was ingested without any ranges.
    #[error("level repaired at {repaired_at} has no ranges")]
    EmptyLevel { repaired_at: u64 },

    /// Two ranges inside one level overlap each other.
    #[error("level repaired at {repaired_at} has overlapping ranges {first} and {second}")]
    OverlappingRanges {
        first: String,
        second: String,
        repaired_at: u64,
    },

    /// A level was stamped with the `UNREPAIRED` sentinel.
    #[error("repaired_at 0 is reserved for unrepaired data")]
    UnrepairedTimestamp,
}

impl RepairStateError {
    /// Build an [`RepairStateError::InvalidRange`] from raw endpoints.
    pub fn invalid_range<T: Debug>(left: &T, right: &T) -> Self {
        Self::InvalidRange {
            left: format!("{left:?}"),
            right: format!("{right:?}"),
        }
    }

    /// Build an [`RepairStateError::OverlappingRanges`] from two offending ranges.
    pub fn overlapping(
        first: impl Into<String>,
        second: impl Into<String>,
        repaired_at: u64,
    ) -> Self {
        Self::OverlappingRanges {
            first: first.into(),
            second: second.into(),
            repaired_at,
        }
    }

    /// True for errors caused by a malformed caller-supplied level.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::EmptyLevel { .. } | Self::OverlappingRanges { .. } | Self::UnrepairedTimestamp
        )
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, RepairStateError>;
