use std::collections::HashSet;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};

use crate::data::WeightedEdge;
use crate::errors::FlowError;
use crate::types::Weight;

/// Compiled (source pattern, target pattern) exclusion pairs.
///
/// Compilation happens once, up front, so an unparsable pattern fails the
/// whole configuration instead of being skipped mid-run.
#[derive(Clone, Debug)]
pub struct ExcludedPatterns {
    patterns: Vec<(Regex, Regex)>,
}

impl ExcludedPatterns {
    /// Compile pattern pairs with case-insensitive, partial-match semantics.
    pub fn compile<'a, I>(pairs: I) -> Result<Self, FlowError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut patterns = Vec::new();
        for (source_pattern, target_pattern) in pairs {
            patterns.push((
                compile_one(source_pattern)?,
                compile_one(target_pattern)?,
            ));
        }
        Ok(Self { patterns })
    }

    /// True when no pattern pairs were configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when any pair matches both the source and the target label.
    pub fn matches(&self, source: &str, target: &str) -> bool {
        self.patterns
            .iter()
            .any(|(s_pat, t_pat)| s_pat.is_match(source) && t_pat.is_match(target))
    }
}

fn compile_one(pattern: &str) -> Result<Regex, FlowError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| FlowError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Drop edges whose (source, target) exactly matches an excluded pair.
///
/// Exclusion entries are trimmed before comparison; edge order is preserved.
pub fn filter_exact(edges: Vec<WeightedEdge>, excluded_pairs: &[(String, String)]) -> Vec<WeightedEdge> {
    if excluded_pairs.is_empty() {
        return edges;
    }
    let excluded: HashSet<(&str, &str)> = excluded_pairs
        .iter()
        .map(|(source, target)| (source.trim(), target.trim()))
        .collect();
    edges
        .into_iter()
        .filter(|edge| !excluded.contains(&(edge.source.as_str(), edge.target.as_str())))
        .collect()
}

/// Drop edges matched by any compiled pattern pair (AND over the two halves).
pub fn filter_regex(edges: Vec<WeightedEdge>, excluded: &ExcludedPatterns) -> Vec<WeightedEdge> {
    if excluded.is_empty() {
        return edges;
    }
    edges
        .into_iter()
        .filter(|edge| !excluded.matches(&edge.source, &edge.target))
        .collect()
}

/// Keep edges with weight at or above `min_count`. `None` disables.
pub fn filter_min_count(edges: Vec<WeightedEdge>, min_count: Option<Weight>) -> Vec<WeightedEdge> {
    match min_count {
        None => edges,
        Some(min) => edges.into_iter().filter(|edge| edge.weight >= min).collect(),
    }
}

/// Keep the first `n` edges in aggregate order. `None` disables.
pub fn top_n(mut edges: Vec<WeightedEdge>, n: Option<usize>) -> Vec<WeightedEdge> {
    if let Some(n) = n {
        edges.truncate(n);
    }
    edges
}

/// Keep only edges flowing into the `n` leading target domains.
///
/// Targets are ranked by how many distinct edges connect into them (not by
/// summed weight); ties keep first-appearance order. Every edge into a
/// retained target survives, in its original order, so the leading targets
/// keep their full fan-in. `None` disables.
pub fn top_targets(edges: Vec<WeightedEdge>, n: Option<usize>) -> Vec<WeightedEdge> {
    let n = match n {
        Some(n) => n,
        None => return edges,
    };
    let mut edge_counts: IndexMap<&str, usize> = IndexMap::new();
    for edge in &edges {
        *edge_counts.entry(edge.target.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = edge_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let retained: HashSet<String> = ranked
        .into_iter()
        .take(n)
        .map(|(target, _)| target.to_string())
        .collect();
    edges
        .into_iter()
        .filter(|edge| retained.contains(&edge.target))
        .collect()
}
