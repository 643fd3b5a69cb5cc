use thiserror::Error;

use crate::data::Role;

/// Error type for pipeline validation and configuration failures.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("row {row} has an empty {role} label")]
    EmptyLabel { row: usize, role: Role },
    #[error("no edges to index (all rows filtered out or empty input)")]
    EmptyEdgeSet,
    #[error("invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl FlowError {
    /// True for malformed-input failures (as opposed to bad configuration).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FlowError::EmptyLabel { .. } | FlowError::EmptyEdgeSet
        )
    }
}
