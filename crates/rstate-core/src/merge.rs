//! Timestamp-priority merge of repair levels.
//!
//! Levels are visited freshest first. Each one keeps only the territory no
//! fresher level has claimed yet; whatever survives becomes its reduced range
//! set and one section per surviving range. Levels that share a timestamp
//! form a single tier and come out as one level.

use std::cmp::Reverse;

use rstate_types::ranges::{deoverlap, normalize, subtract_all};
use rstate_types::{Range, Token};
use tracing::{debug, trace};

use crate::instrumentation::record_merge;
use crate::level::{Level, Section};
use crate::state::State;

/// Resolve possibly overlapping levels into a canonical [`State`].
///
/// The result does not depend on the order of `levels`.
pub(crate) fn merge_levels<T: Token>(mut levels: Vec<Level<T>>) -> State<T> {
    let _span =
        tracing::debug_span!(target: "rstate.merge", "rstate_merge", levels_in = levels.len())
            .entered();

    levels.sort_by_key(|level| Reverse(level.repaired_at()));

    let mut claimed: Vec<Range<T>> = Vec::new();
    let mut merged: Vec<Level<T>> = Vec::new();
    let mut sections: Vec<Section<T>> = Vec::new();
    let mut superseded = 0_usize;

    for tier in levels.chunk_by(|a, b| a.repaired_at() == b.repaired_at()) {
        let repaired_at = tier[0].repaired_at();
        let remaining = match tier {
            [level] => subtract_all(level.ranges(), &claimed),
            _ => {
                let combined = deoverlap(tier.iter().flat_map(|l| l.ranges().iter().cloned()));
                subtract_all(&combined, &claimed)
            }
        };

        if remaining.is_empty() {
            trace!(
                target: "rstate.merge",
                repaired_at,
                levels = tier.len(),
                "level fully superseded by fresher repairs"
            );
            superseded += 1;
            continue;
        }

        sections.extend(
            remaining
                .iter()
                .cloned()
                .map(|range| Section::new(range, repaired_at)),
        );
        claimed = normalize(claimed.into_iter().chain(remaining.iter().cloned()));
        merged.push(Level::from_parts(remaining, repaired_at));
    }

    sections.sort_by(|a, b| a.range().cmp(b.range()));
    record_merge(superseded, sections.len());
    debug!(
        target: "rstate.merge",
        levels_out = merged.len(),
        superseded,
        sections = sections.len(),
        covered = claimed.len(),
        "merged repair levels"
    );

    State::from_parts(merged, sections, claimed)
}
