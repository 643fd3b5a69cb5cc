use indexmap::IndexMap;

use crate::data::{CategoryPair, Role, WeightedEdge};
use crate::errors::FlowError;
use crate::types::Weight;

/// Group pairs by (source, target) and count occurrences.
///
/// Output is ordered by weight descending, then source, then target, so
/// repeated runs over the same rows produce the same edge sequence. Rejects
/// any row with an empty (post-trim) label on either side; upstream cleaning
/// is the caller's job, but malformed rows must never aggregate silently.
pub fn aggregate(pairs: &[CategoryPair]) -> Result<Vec<WeightedEdge>, FlowError> {
    let mut counts: IndexMap<(String, String), Weight> = IndexMap::new();

    for (row, pair) in pairs.iter().enumerate() {
        let source = pair.source.trim();
        let target = pair.target.trim();
        if source.is_empty() {
            return Err(FlowError::EmptyLabel {
                row,
                role: Role::Source,
            });
        }
        if target.is_empty() {
            return Err(FlowError::EmptyLabel {
                row,
                role: Role::Target,
            });
        }
        *counts
            .entry((source.to_string(), target.to_string()))
            .or_insert(0) += 1;
    }

    let mut edges: Vec<WeightedEdge> = counts
        .into_iter()
        .map(|((source, target), weight)| WeightedEdge {
            source,
            target,
            weight,
        })
        .collect();
    edges.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    });
    Ok(edges)
}
