//! Half-open token ranges.
//!
//! A [`Range`] is `(left, right]`: exclusive of `left`, inclusive of `right`.
//! Ring wrap-around is resolved by callers before ranges reach this crate, so
//! every range satisfies `left < right`.

use std::fmt::{self, Debug, Display};

use rstate_error::{RepairStateError, Result};
use serde::Serialize;
use smallvec::SmallVec;

/// Ordered coordinate of the key space.
///
/// Only ordering and equality are needed; any `Ord + Clone + Debug` type
/// (integers, byte strings, partitioner tokens) qualifies.
pub trait Token: Ord + Clone + Debug {}

impl<T: Ord + Clone + Debug> Token for T {}

/// A non-wrapping `(left, right]` interval.
///
/// Ordering is by `left`, then `right`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Range<T> {
    pub(crate) left: T,
    pub(crate) right: T,
}

impl<T: Token> Range<T> {
    /// Create a range, rejecting empty or wrapping bounds.
    pub fn new(left: T, right: T) -> Result<Self> {
        if left >= right {
            return Err(RepairStateError::invalid_range(&left, &right));
        }
        Ok(Self { left, right })
    }

    /// Callers guarantee `left < right`.
    pub(crate) fn from_bounds(left: T, right: T) -> Self {
        debug_assert!(left < right, "range bounds must be ordered");
        Self { left, right }
    }

    /// Exclusive lower bound.
    #[must_use]
    pub const fn left(&self) -> &T {
        &self.left
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn right(&self) -> &T {
        &self.right
    }

    /// Render as `(left,right]` using the tokens' `Debug` form.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("({:?},{:?}]", self.left, self.right)
    }

    /// True when the two ranges share at least one token.
    ///
    /// Ranges that merely touch, like `(1,2]` and `(2,3]`, do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.left < other.right && other.left < self.right
    }

    /// True when `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.left <= other.left && other.right <= self.right
    }

    /// True when `token` falls in `(left, right]`.
    #[must_use]
    pub fn contains_token(&self, token: &T) -> bool {
        self.left < *token && *token <= self.right
    }

    /// True when `other` starts exactly where `self` ends.
    #[must_use]
    pub fn is_followed_by(&self, other: &Self) -> bool {
        self.right == other.left
    }

    /// Shared sub-range, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let left = self.left.clone().max(other.left.clone());
        let right = self.right.clone().min(other.right.clone());
        Some(Self::from_bounds(left, right))
    }

    /// Remove `other` from `self`.
    ///
    /// Removing a strictly contained sub-range leaves two pieces; removing a
    /// range that covers one end leaves one; full coverage leaves none.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> RangeDifference<T> {
        if !self.intersects(other) {
            return RangeDifference::One(self.clone());
        }
        let below = (self.left < other.left)
            .then(|| Self::from_bounds(self.left.clone(), other.left.clone()));
        let above = (other.right < self.right)
            .then(|| Self::from_bounds(other.right.clone(), self.right.clone()));
        match (below, above) {
            (None, None) => RangeDifference::Empty,
            (Some(piece), None) | (None, Some(piece)) => RangeDifference::One(piece),
            (Some(below), Some(above)) => RangeDifference::Two(below, above),
        }
    }
}

impl<T: Display> Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{}]", self.left, self.right)
    }
}

/// What remains of a range after another range is subtracted from it.
///
/// Pieces are ordered left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeDifference<T> {
    Empty,
    One(Range<T>),
    Two(Range<T>, Range<T>),
}

impl<T> RangeDifference<T> {
    /// Number of remaining pieces.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl<T> IntoIterator for RangeDifference<T> {
    type Item = Range<T>;
    type IntoIter = smallvec::IntoIter<[Range<T>; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        let pieces: SmallVec<[Range<T>; 2]> = match self {
            Self::Empty => SmallVec::new(),
            Self::One(piece) => smallvec::smallvec![piece],
            Self::Two(below, above) => smallvec::smallvec![below, above],
        };
        pieces.into_iter()
    }
}
