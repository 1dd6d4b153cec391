//! Immutable repaired-state snapshots and the coverage query.

use std::fmt::{self, Display};

use rstate_types::ranges::covers;
use rstate_types::{Range, RepairedAt, Token, UNREPAIRED};
use serde::Serialize;
use tracing::trace;

use crate::instrumentation::record_query;
use crate::level::{Level, Section};
use crate::merge::merge_levels;

/// A merged, read-only view of repaired territory.
///
/// - `levels`: reduced levels, freshest first, never empty, pairwise disjoint.
/// - `sections`: non-overlapping `(range, repaired_at)` pairs sorted by start,
///   partitioning `covered`.
/// - `covered`: the minimal disjoint union of every range ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State<T> {
    levels: Vec<Level<T>>,
    sections: Vec<Section<T>>,
    covered: Vec<Range<T>>,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self {
            levels: Vec::new(),
            sections: Vec::new(),
            covered: Vec::new(),
        }
    }
}

impl<T: Token> State<T> {
    /// State with nothing repaired.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        levels: Vec<Level<T>>,
        sections: Vec<Section<T>>,
        covered: Vec<Range<T>>,
    ) -> Self {
        Self {
            levels,
            sections,
            covered,
        }
    }

    /// Merge `levels` from scratch.
    #[must_use]
    pub fn from_levels(levels: Vec<Level<T>>) -> Self {
        merge_levels(levels)
    }

    #[must_use]
    pub fn levels(&self) -> &[Level<T>] {
        &self.levels
    }

    #[must_use]
    pub fn sections(&self) -> &[Section<T>] {
        &self.sections
    }

    #[must_use]
    pub fn covered(&self) -> &[Range<T>] {
        &self.covered
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Fold a newly completed repair into this snapshot.
    ///
    /// Runs the same resolution as the initial merge over the existing
    /// levels plus `level`; `self` is left untouched.
    #[must_use]
    pub fn merge_level(&self, level: Level<T>) -> Self {
        let mut levels = Vec::with_capacity(self.levels.len() + 1);
        levels.extend(self.levels.iter().cloned());
        levels.push(level);
        merge_levels(levels)
    }

    /// Oldest `repaired_at` among sections touching `ranges`.
    ///
    /// Returns [`UNREPAIRED`] unless every query range lies inside `covered`:
    /// a single unrepaired token makes the whole answer unknown. An empty
    /// query proves nothing and also yields [`UNREPAIRED`].
    #[must_use]
    pub fn min_repaired_at(&self, ranges: &[Range<T>]) -> RepairedAt {
        if ranges.is_empty() || !ranges.iter().all(|query| covers(&self.covered, query)) {
            trace!(target: "rstate.query", queries = ranges.len(), "query not fully covered");
            record_query(true);
            return UNREPAIRED;
        }

        let oldest = ranges
            .iter()
            .flat_map(|query| self.sections_touching(query))
            .map(Section::repaired_at)
            .min()
            .unwrap_or(UNREPAIRED);
        record_query(oldest == UNREPAIRED);
        oldest
    }

    /// Sections sharing at least one token with `query`, in order.
    pub fn sections_touching<'a>(
        &'a self,
        query: &'a Range<T>,
    ) -> impl Iterator<Item = &'a Section<T>> + 'a {
        let start = self
            .sections
            .partition_point(|section| section.range().right() <= query.left());
        self.sections[start..]
            .iter()
            .take_while(move |section| section.range().left() < query.right())
    }
}

impl<T: Display> Display for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<I: Display>(f: &mut fmt::Formatter<'_>, items: &[I]) -> fmt::Result {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str("]")
        }

        f.write_str("State{levels=")?;
        list(f, &self.levels)?;
        f.write_str(", sections=")?;
        list(f, &self.sections)?;
        f.write_str(", covered=")?;
        list(f, &self.covered)?;
        f.write_str("}")
    }
}
