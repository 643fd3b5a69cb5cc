use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::aggregate;
use crate::cap::cap_sources_per_target;
use crate::config::PipelineConfig;
use crate::data::{CategoryPair, FlowLink, WeightedEdge};
use crate::errors::FlowError;
use crate::filters::{
    filter_exact, filter_min_count, filter_regex, top_n, top_targets, ExcludedPatterns,
};
use crate::index::{build_node_index, NodeIndex};
use crate::types::Weight;

/// Runs the fixed stage order over raw category pairs:
/// aggregate → exact filter → regex filter → min-count → top-n →
/// top-targets → per-target cap → index.
///
/// Construction compiles the configured exclusion patterns, so a bad
/// pattern fails before any data is touched.
#[derive(Clone, Debug)]
pub struct FlowPipeline {
    config: PipelineConfig,
    excluded_patterns: ExcludedPatterns,
}

impl FlowPipeline {
    /// Build a pipeline, compiling regex exclusions up front.
    pub fn new(config: PipelineConfig) -> Result<Self, FlowError> {
        let excluded_patterns = ExcludedPatterns::compile(
            config
                .excluded_pair_patterns
                .iter()
                .map(|(s, t)| (s.as_str(), t.as_str())),
        )?;
        Ok(Self {
            config,
            excluded_patterns,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage and index the surviving edges.
    ///
    /// The reported total weight is taken after aggregation but before the
    /// count filters, so link shares reflect the whole (exclusion-filtered)
    /// corpus rather than only the edges that stayed on the chart.
    pub fn run(&self, pairs: &[CategoryPair]) -> Result<FlowSummary, FlowError> {
        let edges = aggregate(pairs)?;
        debug!(edges = edges.len(), rows = pairs.len(), "aggregated pairs");

        let edges = filter_exact(edges, &self.config.excluded_pairs);
        let edges = filter_regex(edges, &self.excluded_patterns);
        debug!(edges = edges.len(), "after pair exclusions");

        let total_weight: Weight = edges.iter().map(|edge| edge.weight).sum();

        let edges = filter_min_count(edges, self.config.min_count);
        let edges = top_n(edges, self.config.top_n);
        let edges = top_targets(edges, self.config.top_targets);
        let edges = cap_sources_per_target(
            edges,
            self.config.max_sources_per_target,
            self.config.tiebreak,
            self.config.seed,
        );
        debug!(edges = edges.len(), total_weight, "after count filters and cap");

        let index = build_node_index(&edges)?;
        Ok(FlowSummary {
            edges,
            index,
            total_weight,
        })
    }
}

/// Final pipeline output: surviving edges plus their node index.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FlowSummary {
    /// Edges in final order (aggregate order reshaped by the per-target cap).
    pub edges: Vec<WeightedEdge>,
    /// Node ids for the surviving labels.
    pub index: NodeIndex,
    /// Sum of edge weights before the min-count/top-n/cap stages.
    pub total_weight: Weight,
}

impl FlowSummary {
    /// Index-assigned link rows for a renderer, in edge order.
    ///
    /// Shares are fractions of `total_weight`, zero when the corpus was
    /// empty after exclusions.
    pub fn links(&self) -> Vec<FlowLink> {
        self.edges
            .iter()
            .map(|edge| FlowLink {
                // Labels come from the indexed edge set, so the lookups
                // cannot miss.
                source: self.index.source_id(&edge.source).unwrap_or_default(),
                target: self.index.target_id(&edge.target).unwrap_or_default(),
                value: edge.weight,
                share: if self.total_weight == 0 {
                    0.0
                } else {
                    edge.weight as f64 / self.total_weight as f64
                },
            })
            .collect()
    }

    /// Combined node label list: sources then targets.
    pub fn labels(&self) -> Vec<&str> {
        self.index.labels()
    }
}
