//! Published repaired state with copy-on-write updates.
//!
//! Readers clone the current `Arc<State>` and query it without further
//! coordination. Writers are serialized, build the next snapshot off to the
//! side, and swap it in; a reader holding an older snapshot keeps seeing it
//! unchanged.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rstate_error::Result;
use rstate_types::{Range, RepairedAt, Token};
use tracing::debug;

use crate::builder::admit_level;
use crate::config::RepairedStateConfig;
use crate::instrumentation::record_publish;
use crate::state::State;

/// Shared handle to the current repaired-state snapshot.
#[derive(Debug)]
pub struct RepairedState<T> {
    config: RepairedStateConfig,
    published: RwLock<Arc<State<T>>>,
    writer: Mutex<()>,
}

impl<T: Token> Default for RepairedState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token> RepairedState<T> {
    /// Handle with nothing repaired yet.
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(State::empty(), RepairedStateConfig::default())
    }

    #[must_use]
    pub fn from_state(state: State<T>, config: RepairedStateConfig) -> Self {
        Self {
            config,
            published: RwLock::new(Arc::new(state)),
            writer: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RepairedStateConfig {
        &self.config
    }

    /// Currently published snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<State<T>> {
        Arc::clone(&self.published.read())
    }

    /// See [`State::min_repaired_at`]; answered from the current snapshot.
    #[must_use]
    pub fn min_repaired_at(&self, ranges: &[Range<T>]) -> RepairedAt {
        self.state().min_repaired_at(ranges)
    }

    /// Fold a freshly completed repair into the published state.
    ///
    /// On error nothing is published.
    pub fn add(
        &self,
        ranges: impl IntoIterator<Item = Range<T>>,
        repaired_at: RepairedAt,
    ) -> Result<()> {
        let level = admit_level(ranges, repaired_at, &self.config)?;

        let _writer = self.writer.lock();
        let next = Arc::new(self.state().merge_level(level));
        let (levels, sections) = (next.levels().len(), next.sections().len());
        *self.published.write() = next;

        record_publish();
        debug!(
            target: "rstate.publish",
            repaired_at,
            levels,
            sections,
            "published repaired state"
        );
        Ok(())
    }
}
