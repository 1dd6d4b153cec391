//! Repair reports and the merged sections they resolve into.

use std::fmt::{self, Display};

use rstate_error::{RepairStateError, Result};
use rstate_types::ranges::{deoverlap, find_overlap};
use rstate_types::{Range, RepairedAt, Token, UNREPAIRED};
use serde::Serialize;

use crate::config::IntraLevelOverlap;

/// One repair report: disjoint ranges sharing a single `repaired_at`.
///
/// Ranges are kept sorted by left endpoint. A `Level` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Level<T> {
    ranges: Vec<Range<T>>,
    repaired_at: RepairedAt,
}

impl<T: Token> Level<T> {
    /// Validate a report, rejecting overlap between its own ranges.
    pub fn new(
        ranges: impl IntoIterator<Item = Range<T>>,
        repaired_at: RepairedAt,
    ) -> Result<Self> {
        Self::with_overlap_policy(ranges, repaired_at, IntraLevelOverlap::Reject)
    }

    /// Validate a report, handling overlap between its own ranges per `policy`.
    pub fn with_overlap_policy(
        ranges: impl IntoIterator<Item = Range<T>>,
        repaired_at: RepairedAt,
        policy: IntraLevelOverlap,
    ) -> Result<Self> {
        if repaired_at == UNREPAIRED {
            return Err(RepairStateError::UnrepairedTimestamp);
        }
        let ranges = match policy {
            IntraLevelOverlap::Reject => {
                let mut ranges: Vec<Range<T>> = ranges.into_iter().collect();
                ranges.sort();
                if let Some((first, second)) = find_overlap(&ranges) {
                    return Err(RepairStateError::overlapping(
                        first.describe(),
                        second.describe(),
                        repaired_at,
                    ));
                }
                ranges
            }
            IntraLevelOverlap::Coalesce => deoverlap(ranges),
        };
        if ranges.is_empty() {
            return Err(RepairStateError::EmptyLevel { repaired_at });
        }
        Ok(Self {
            ranges,
            repaired_at,
        })
    }

    /// Callers guarantee `ranges` is non-empty, sorted and disjoint.
    pub(crate) fn from_parts(ranges: Vec<Range<T>>, repaired_at: RepairedAt) -> Self {
        debug_assert!(!ranges.is_empty(), "levels are never empty");
        debug_assert!(find_overlap(&ranges).is_none(), "level ranges overlap");
        Self {
            ranges,
            repaired_at,
        }
    }

    #[must_use]
    pub fn ranges(&self) -> &[Range<T>] {
        &self.ranges
    }

    #[must_use]
    pub const fn repaired_at(&self) -> RepairedAt {
        self.repaired_at
    }
}

impl<T: Display> Display for Level<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{range}")?;
        }
        write!(f, "}}@{}", self.repaired_at)
    }
}

/// A merged sub-range bound to the timestamp of the level that won it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Section<T> {
    range: Range<T>,
    repaired_at: RepairedAt,
}

impl<T: Token> Section<T> {
    #[must_use]
    pub const fn new(range: Range<T>, repaired_at: RepairedAt) -> Self {
        Self { range, repaired_at }
    }

    #[must_use]
    pub const fn range(&self) -> &Range<T> {
        &self.range
    }

    #[must_use]
    pub const fn repaired_at(&self) -> RepairedAt {
        self.repaired_at
    }
}

impl<T: Display> Display for Section<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.range, self.repaired_at)
    }
}
