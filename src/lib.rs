#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Pair aggregation into weighted edges.
pub mod aggregate;
/// Per-target fan-out capping with deterministic tie-breaking.
pub mod cap;
/// Pipeline configuration types.
pub mod config;
/// Centralized constants for defaults and label display.
pub mod constants;
/// Record-level corpus filters and summary tables.
pub mod corpus;
/// Core data types shared across stages.
pub mod data;
/// Edge-level exclusion and threshold filters.
pub mod filters;
/// Node id assignment for the combined label list.
pub mod index;
/// The fixed stage pipeline and its summary output.
pub mod pipeline;
/// Shared type aliases.
pub mod types;
/// Label truncation and wrapping helpers.
pub mod utils;

mod errors;

pub use aggregate::aggregate;
pub use cap::cap_sources_per_target;
pub use config::{PipelineConfig, Tiebreak};
pub use corpus::{
    exclude_domains, filter_keywords, pairs_from_records, sample_examples, top_source_domains,
    treemap_weights, CorpusRecord, KeywordFilter, TreemapLeaf,
};
pub use data::{CategoryPair, FlowLink, Role, WeightedEdge};
pub use errors::FlowError;
pub use filters::{
    filter_exact, filter_min_count, filter_regex, top_n, top_targets, ExcludedPatterns,
};
pub use index::{build_node_index, NodeIndex};
pub use pipeline::{FlowPipeline, FlowSummary};
pub use types::{NodeId, SourceLabel, TargetLabel, Weight};
