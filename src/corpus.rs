use indexmap::IndexMap;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::data::CategoryPair;
use crate::errors::FlowError;
use crate::types::{Keyword, SourceLabel, TargetLabel, VolumeId, Weight};

/// One annotated metaphor occurrence, already parsed and trimmed upstream.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorpusRecord {
    /// Stable row identifier from the corpus.
    pub id: String,
    /// Report volume the occurrence was found in.
    pub volume: VolumeId,
    /// Verbatim expression as it appears in the text.
    pub expression: String,
    /// Source domain of the conceptual mapping.
    pub source_domain: SourceLabel,
    /// Target domain of the conceptual mapping.
    pub target_domain: TargetLabel,
    /// Canonical metaphor formulation (e.g. `LA PAZ ES UNA CONSTRUCCIÓN`).
    pub metaphor: String,
}

impl CorpusRecord {
    /// Project the record to its (source, target) pair.
    pub fn pair(&self) -> CategoryPair {
        CategoryPair::new(&self.source_domain, &self.target_domain)
    }
}

/// Keyword matcher over a record's metaphor text and target domain.
///
/// Literal mode does case-insensitive substring matching; regex mode
/// compiles each keyword as a case-insensitive pattern up front, failing
/// construction on the first bad pattern.
#[derive(Clone, Debug)]
pub struct KeywordFilter {
    keywords: Vec<Keyword>,
    patterns: Option<Vec<regex::Regex>>,
}

impl KeywordFilter {
    /// Build a literal (substring) matcher.
    pub fn literal<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Keyword>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            patterns: None,
        }
    }

    /// Build a regex matcher, compiling every keyword as a pattern.
    pub fn regex<I, S>(keywords: I) -> Result<Self, FlowError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Keyword>,
    {
        let keywords: Vec<Keyword> = keywords.into_iter().map(Into::into).collect();
        let mut patterns = Vec::with_capacity(keywords.len());
        for keyword in &keywords {
            let pattern = RegexBuilder::new(keyword)
                .case_insensitive(true)
                .build()
                .map_err(|source| FlowError::InvalidPattern {
                    pattern: keyword.clone(),
                    source,
                })?;
            patterns.push(pattern);
        }
        Ok(Self {
            keywords,
            patterns: Some(patterns),
        })
    }

    /// True when any keyword occurs in the given text.
    pub fn matches_text(&self, text: &str) -> bool {
        match &self.patterns {
            Some(patterns) => patterns.iter().any(|pattern| pattern.is_match(text)),
            None => {
                let lowered = text.to_lowercase();
                self.keywords
                    .iter()
                    .any(|keyword| lowered.contains(&keyword.to_lowercase()))
            }
        }
    }

    /// True when the record's metaphor text or target domain matches.
    pub fn matches(&self, record: &CorpusRecord) -> bool {
        self.matches_text(&record.metaphor) || self.matches_text(&record.target_domain)
    }

    /// True when the record's target domain alone matches.
    pub fn matches_target_domain(&self, record: &CorpusRecord) -> bool {
        self.matches_text(&record.target_domain)
    }
}

/// Drop records whose source or target domain is on an exclusion list.
///
/// Matching is exact after trimming both sides; record order is preserved.
pub fn exclude_domains(
    records: Vec<CorpusRecord>,
    excluded_sources: &[String],
    excluded_targets: &[String],
) -> Vec<CorpusRecord> {
    if excluded_sources.is_empty() && excluded_targets.is_empty() {
        return records;
    }
    let sources: Vec<&str> = excluded_sources.iter().map(|s| s.trim()).collect();
    let targets: Vec<&str> = excluded_targets.iter().map(|t| t.trim()).collect();
    records
        .into_iter()
        .filter(|record| {
            !sources.contains(&record.source_domain.trim())
                && !targets.contains(&record.target_domain.trim())
        })
        .collect()
}

/// Keep records matched by the keyword filter.
pub fn filter_keywords(records: Vec<CorpusRecord>, filter: &KeywordFilter) -> Vec<CorpusRecord> {
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect()
}

/// Project records to the (source, target) pairs the pipeline consumes.
pub fn pairs_from_records(records: &[CorpusRecord]) -> Vec<CategoryPair> {
    records.iter().map(CorpusRecord::pair).collect()
}

/// Source-domain frequency table, count descending (label ascending on ties).
///
/// `limit` truncates the table; `None` keeps every domain.
pub fn top_source_domains(
    records: &[CorpusRecord],
    limit: Option<usize>,
) -> Vec<(SourceLabel, Weight)> {
    let mut counts: IndexMap<&str, Weight> = IndexMap::new();
    for record in records {
        *counts.entry(record.source_domain.as_str()).or_insert(0) += 1;
    }
    let mut table: Vec<(SourceLabel, Weight)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if let Some(limit) = limit {
        table.truncate(limit);
    }
    table
}

/// One leaf of the target-domain → source-domain hierarchy chart.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreemapLeaf {
    /// Outer tile: the target domain grouping the leaf.
    pub target_domain: TargetLabel,
    /// Inner tile: a source domain mapping into that target.
    pub source_domain: SourceLabel,
    /// Occurrence count for this (target, source) combination.
    pub weight: Weight,
}

/// Aggregate (target domain, source domain) weights for a treemap.
///
/// Only records whose target domain itself matches the keyword filter
/// contribute; returns an empty list (not an error) when none do, so the
/// caller can skip the figure.
pub fn treemap_weights(records: &[CorpusRecord], filter: &KeywordFilter) -> Vec<TreemapLeaf> {
    let mut counts: IndexMap<(&str, &str), Weight> = IndexMap::new();
    for record in records {
        if !filter.matches_target_domain(record) {
            continue;
        }
        *counts
            .entry((record.target_domain.as_str(), record.source_domain.as_str()))
            .or_insert(0) += 1;
    }
    let mut leaves: Vec<TreemapLeaf> = counts
        .into_iter()
        .map(|((target, source), weight)| TreemapLeaf {
            target_domain: target.to_string(),
            source_domain: source.to_string(),
            weight,
        })
        .collect();
    leaves.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.target_domain.cmp(&b.target_domain))
            .then_with(|| a.source_domain.cmp(&b.source_domain))
    });
    leaves
}

/// Pick example rows for the most frequent source domains.
///
/// For each of the `top_domains` highest-count source domains, takes the
/// first `per_domain` records in corpus order.
pub fn sample_examples(
    records: &[CorpusRecord],
    top_domains: usize,
    per_domain: usize,
) -> Vec<CorpusRecord> {
    let leading = top_source_domains(records, Some(top_domains));
    let mut examples = Vec::new();
    for (domain, _) in leading {
        examples.extend(
            records
                .iter()
                .filter(|record| record.source_domain == domain)
                .take(per_domain)
                .cloned(),
        );
    }
    examples
}
