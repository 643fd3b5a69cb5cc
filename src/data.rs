use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::types::{NodeId, SourceLabel, TargetLabel, Weight};

/// Which end of a mapping a label sits on.
///
/// A label appearing in both roles is two distinct nodes, one per role.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    /// Origin end of the mapping.
    Source,
    /// Destination end of the mapping.
    Target,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Source => f.write_str("source"),
            Role::Target => f.write_str("target"),
        }
    }
}

/// One observed (source domain, target domain) occurrence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryPair {
    /// Origin label, trimmed of surrounding whitespace.
    pub source: SourceLabel,
    /// Destination label, trimmed of surrounding whitespace.
    pub target: TargetLabel,
}

impl CategoryPair {
    /// Build a pair, trimming surrounding whitespace on both labels.
    pub fn new(source: impl AsRef<str>, target: impl AsRef<str>) -> Self {
        Self {
            source: source.as_ref().trim().to_string(),
            target: target.as_ref().trim().to_string(),
        }
    }
}

/// Aggregated flow between one source and one target.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeightedEdge {
    /// Origin label of the flow.
    pub source: SourceLabel,
    /// Destination label of the flow.
    pub target: TargetLabel,
    /// Number of observed occurrences sharing this (source, target) pair.
    pub weight: Weight,
}

impl WeightedEdge {
    /// Convenience constructor used throughout tests and callers.
    pub fn new(source: impl Into<SourceLabel>, target: impl Into<TargetLabel>, weight: Weight) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Index-assigned link row, ready for a two-layer flow renderer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FlowLink {
    /// Node id of the source label (within the source block).
    pub source: NodeId,
    /// Node id of the target label (within the target block).
    pub target: NodeId,
    /// Flow weight.
    pub value: Weight,
    /// Share of the pre-filter corpus total, in `[0, 1]`.
    pub share: f64,
}
