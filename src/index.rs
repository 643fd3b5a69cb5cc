use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::data::WeightedEdge;
use crate::errors::FlowError;
use crate::types::{NodeId, SourceLabel, TargetLabel};

/// Combined node list for a two-layer flow diagram.
///
/// Distinct source labels occupy positions `[0, S)` and distinct target
/// labels `[S, S + T)`, each block in first-appearance order across the
/// edge list. A label used in both roles gets one index per role.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeIndex {
    sources: IndexSet<SourceLabel>,
    targets: IndexSet<TargetLabel>,
}

impl NodeIndex {
    /// Distinct source labels in first-appearance order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    /// Distinct target labels in first-appearance order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(String::as_str)
    }

    /// Combined label list: the source block followed by the target block.
    pub fn labels(&self) -> Vec<&str> {
        self.sources().chain(self.targets()).collect()
    }

    /// Node id of a source label, if present.
    pub fn source_id(&self, label: &str) -> Option<NodeId> {
        self.sources.get_index_of(label)
    }

    /// Node id of a target label, if present. Offset past the source block.
    pub fn target_id(&self, label: &str) -> Option<NodeId> {
        self.targets
            .get_index_of(label)
            .map(|position| position + self.sources.len())
    }

    /// Total node count across both blocks.
    pub fn len(&self) -> usize {
        self.sources.len() + self.targets.len()
    }

    /// True when the index holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.targets.is_empty()
    }
}

/// Assign node ids to the distinct labels of an edge list.
///
/// Fails on an empty edge list so callers can surface "no data" distinctly
/// from a crash.
pub fn build_node_index(edges: &[WeightedEdge]) -> Result<NodeIndex, FlowError> {
    if edges.is_empty() {
        return Err(FlowError::EmptyEdgeSet);
    }
    let mut sources = IndexSet::new();
    let mut targets = IndexSet::new();
    for edge in edges {
        sources.insert(edge.source.clone());
        targets.insert(edge.target.clone());
    }
    Ok(NodeIndex { sources, targets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn index_assigns_contiguous_blocks() {
        let edges = vec![WeightedEdge::new("A", "X", 2), WeightedEdge::new("B", "X", 1)];
        let index = build_node_index(&edges).expect("index");
        assert_eq!(index.sources().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(index.targets().collect::<Vec<_>>(), vec!["X"]);
        assert_eq!(index.source_id("A"), Some(0));
        assert_eq!(index.source_id("B"), Some(1));
        assert_eq!(index.target_id("X"), Some(2));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn label_in_both_roles_gets_two_ids() {
        let edges = vec![WeightedEdge::new("A", "B", 1), WeightedEdge::new("B", "C", 1)];
        let index = build_node_index(&edges).expect("index");
        assert_eq!(index.source_id("B"), Some(1));
        assert_eq!(index.target_id("B"), Some(2));
        assert_eq!(index.labels(), vec!["A", "B", "B", "C"]);
    }

    #[test]
    fn ids_are_unique_within_each_block() {
        let edges = vec![
            WeightedEdge::new("A", "X", 3),
            WeightedEdge::new("B", "Y", 2),
            WeightedEdge::new("A", "Y", 1),
            WeightedEdge::new("C", "X", 1),
        ];
        let index = build_node_index(&edges).expect("index");
        let source_ids: HashSet<_> = index.sources().map(|s| index.source_id(s)).collect();
        let target_ids: HashSet<_> = index.targets().map(|t| index.target_id(t)).collect();
        assert_eq!(source_ids.len(), index.sources().count());
        assert_eq!(target_ids.len(), index.targets().count());
        assert!(source_ids.is_disjoint(&target_ids));
    }

    #[test]
    fn empty_edge_set_is_rejected() {
        let err = build_node_index(&[]).expect_err("empty edges");
        assert!(matches!(err, FlowError::EmptyEdgeSet));
        assert!(err.is_validation());
    }
}
