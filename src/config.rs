use serde::{Deserialize, Serialize};

use crate::constants::pipeline::DEFAULT_SEED;
use crate::types::Weight;

/// Rule for choosing among equal-weight edges when a cap forces a choice.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tiebreak {
    /// No explicit rule: equal-weight edges keep their aggregate order.
    None,
    /// Source label ascending, byte/codepoint order (locale-independent).
    Alphabetical,
    /// Deterministic pseudo-random order derived from the configured seed.
    SeededRandom,
}

/// Pipeline settings.
///
/// Replaces the module-level constants of the original analysis scripts:
/// every knob is an explicit field so two runs with equal configs and equal
/// input produce identical output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Exact (source, target) pairs to drop after aggregation.
    pub excluded_pairs: Vec<(String, String)>,
    /// (source pattern, target pattern) regex pairs; an edge is dropped when
    /// both halves of any pair match (case-insensitive, partial match).
    pub excluded_pair_patterns: Vec<(String, String)>,
    /// Keep only edges with at least this weight. `None` disables.
    pub min_count: Option<Weight>,
    /// Keep only the first n edges in aggregate order. `None` disables.
    pub top_n: Option<usize>,
    /// Keep only edges into the n target domains with the most distinct
    /// edges, retaining every source that connects to them. `None` disables.
    pub top_targets: Option<usize>,
    /// Cap on distinct sources fanning into each target. `None` or `Some(0)`
    /// disables.
    pub max_sources_per_target: Option<usize>,
    /// Tie-break rule applied under the per-target cap.
    pub tiebreak: Tiebreak,
    /// Seed for `Tiebreak::SeededRandom`.
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            excluded_pairs: Vec::new(),
            excluded_pair_patterns: Vec::new(),
            min_count: None,
            top_n: None,
            top_targets: None,
            max_sources_per_target: None,
            tiebreak: Tiebreak::Alphabetical,
            seed: DEFAULT_SEED,
        }
    }
}
