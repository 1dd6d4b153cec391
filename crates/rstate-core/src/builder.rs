//! Two-phase construction: accumulate initial levels, then finalize once.

use rstate_error::Result;
use rstate_types::{Range, RepairedAt, Token};
use tracing::{debug, warn};

use crate::config::RepairedStateConfig;
use crate::instrumentation::{record_level_ingested, record_level_rejected};
use crate::level::Level;
use crate::merge::merge_levels;
use crate::shared::RepairedState;

/// Admit a caller-supplied report under `config`, logging and counting the outcome.
pub(crate) fn admit_level<T: Token>(
    ranges: impl IntoIterator<Item = Range<T>>,
    repaired_at: RepairedAt,
    config: &RepairedStateConfig,
) -> Result<Level<T>> {
    match Level::with_overlap_policy(ranges, repaired_at, config.intra_level_overlap) {
        Ok(level) => {
            record_level_ingested();
            debug!(
                target: "rstate.ingest",
                repaired_at,
                ranges = level.ranges().len(),
                "accepted repair level"
            );
            Ok(level)
        }
        Err(err) => {
            record_level_rejected();
            warn!(target: "rstate.ingest", repaired_at, error = %err, "rejected repair level");
            Err(err)
        }
    }
}

/// Pending buffer of initial repair levels.
///
/// Levels may overlap each other freely; overlap is resolved once, by
/// [`RepairedStateBuilder::finalise_initial_levels`], which consumes the
/// builder so no level can be stored after the merge.
#[derive(Debug, Clone)]
pub struct RepairedStateBuilder<T> {
    config: RepairedStateConfig,
    pending: Vec<Level<T>>,
}

impl<T: Token> Default for RepairedStateBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token> RepairedStateBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RepairedStateConfig::default())
    }

    #[must_use]
    pub const fn with_config(config: RepairedStateConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RepairedStateConfig {
        &self.config
    }

    /// Number of levels waiting for finalization.
    #[must_use]
    pub fn pending_levels(&self) -> usize {
        self.pending.len()
    }

    /// Buffer one repair report.
    ///
    /// Fails, leaving the buffer unchanged, when the report is empty, is
    /// stamped `UNREPAIRED`, or overlaps itself under the `Reject` policy.
    pub fn store_initial_level(
        &mut self,
        ranges: impl IntoIterator<Item = Range<T>>,
        repaired_at: RepairedAt,
    ) -> Result<()> {
        let level = admit_level(ranges, repaired_at, &self.config)?;
        self.pending.push(level);
        Ok(())
    }

    /// Buffer an already validated level.
    pub fn store_level(&mut self, level: Level<T>) {
        record_level_ingested();
        self.pending.push(level);
    }

    /// Merge every pending level and publish the result.
    #[must_use]
    pub fn finalise_initial_levels(self) -> RepairedState<T> {
        let state = merge_levels(self.pending);
        RepairedState::from_state(state, self.config)
    }
}
