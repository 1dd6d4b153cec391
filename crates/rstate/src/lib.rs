//! Repaired token-range bookkeeping.
//!
//! ```
//! use rstate::{Range, RepairedStateBuilder, UNREPAIRED};
//!
//! let r = |left, right| Range::new(left, right).unwrap();
//! let mut builder = RepairedStateBuilder::new();
//! builder.store_initial_level(vec![r(100, 300)], 5)?;
//! builder.store_initial_level(vec![r(200, 400)], 6)?;
//! let repairs = builder.finalise_initial_levels();
//!
//! assert_eq!(repairs.min_repaired_at(&[r(150, 250)]), 5);
//! assert_eq!(repairs.min_repaired_at(&[r(200, 401)]), UNREPAIRED);
//! # Ok::<(), rstate::RepairStateError>(())
//! ```

pub use rstate_core::{
    IntraLevelOverlap, Level, RepairStateMetricsSnapshot, RepairedState, RepairedStateBuilder,
    RepairedStateConfig, Section, State, repair_state_metrics_snapshot,
    reset_repair_state_metrics,
};
pub use rstate_error::{RepairStateError, Result};
pub use rstate_types::{Range, RangeDifference, RepairedAt, Token, UNREPAIRED, ranges};
