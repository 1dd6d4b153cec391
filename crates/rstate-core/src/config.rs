//! Engine configuration.

use serde::{Deserialize, Serialize};

/// How a single report's own overlapping ranges are treated on ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntraLevelOverlap {
    /// Fail with `OverlappingRanges`.
    #[default]
    Reject,
    /// Merge the overlapping ranges before storing the level.
    Coalesce,
}

/// Settings shared by the builder and the published state it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairedStateConfig {
    pub intra_level_overlap: IntraLevelOverlap,
}

impl RepairedStateConfig {
    /// Config that coalesces overlapping ranges within a report instead of failing.
    #[must_use]
    pub const fn coalescing() -> Self {
        Self {
            intra_level_overlap: IntraLevelOverlap::Coalesce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rejects_overlap() {
        assert_eq!(
            RepairedStateConfig::default().intra_level_overlap,
            IntraLevelOverlap::Reject
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: RepairedStateConfig =
            serde_json::from_str("{}").expect("empty object is a valid config");
        assert_eq!(config, RepairedStateConfig::default());
    }

    #[test]
    fn policy_uses_snake_case_names() {
        let config: RepairedStateConfig =
            serde_json::from_str(r#"{"intra_level_overlap":"coalesce"}"#)
                .expect("coalesce policy parses");
        assert_eq!(config, RepairedStateConfig::coalescing());

        let json = serde_json::to_string(&RepairedStateConfig::default()).expect("serializes");
        assert_eq!(json, r#"{"intra_level_overlap":"reject"}"#);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(
            serde_json::from_str::<RepairedStateConfig>(r#"{"intra_level_overlap":"merge"}"#)
                .is_err()
        );
    }
}
