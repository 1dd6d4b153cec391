//! Repaired-state merge engine.
//!
//! Tracks which parts of a node's token ranges have been verified consistent
//! by repair, and as of when. Repair reports ([`Level`]s) may overlap
//! arbitrarily; the engine resolves them by timestamp priority (fresher
//! evidence always wins) into an immutable [`State`]:
//!
//! - reduced levels, freshest first, each owning only what it still wins;
//! - non-overlapping [`Section`]s sorted by range start;
//! - the covered territory, the union of everything ever reported.
//!
//! Construction is two-phase: a [`RepairedStateBuilder`] buffers initial
//! levels and is consumed by `finalise_initial_levels`, which returns a
//! [`RepairedState`] handle. Later repairs are folded in with
//! [`RepairedState::add`], which publishes a new snapshot without disturbing
//! readers of the old one.

pub mod builder;
pub mod config;
pub mod instrumentation;
pub mod level;
mod merge;
pub mod shared;
pub mod state;

pub use builder::RepairedStateBuilder;
pub use config::{IntraLevelOverlap, RepairedStateConfig};
pub use instrumentation::{
    RepairStateMetricsSnapshot, repair_state_metrics_snapshot, reset_repair_state_metrics,
};
pub use level::{Level, Section};
pub use shared::RepairedState;
pub use state::State;
