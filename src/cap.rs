use indexmap::IndexMap;
use rand::RngCore;

use crate::config::Tiebreak;
use crate::data::WeightedEdge;
use crate::types::TargetLabel;

/// Small deterministic RNG (splitmix64) used for reproducible tie-breaking.
#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Retain at most `max_sources` edges per distinct target.
///
/// Edges within each target group are ranked by weight descending; ties are
/// broken per `tiebreak`. `Tiebreak::SeededRandom` draws one key per edge
/// from a single splitmix64 generator seeded once per call, with target
/// groups visited in first-appearance order, so a fixed seed and input set
/// reproduce the same selection run after run.
///
/// `None` or `Some(0)` disables capping. Target groups are emitted in
/// first-appearance order, so targets untouched by the cap keep their
/// relative position.
pub fn cap_sources_per_target(
    edges: Vec<WeightedEdge>,
    max_sources: Option<usize>,
    tiebreak: Tiebreak,
    seed: u64,
) -> Vec<WeightedEdge> {
    let max_sources = match max_sources {
        Some(max) if max > 0 => max,
        _ => return edges,
    };

    let mut groups: IndexMap<TargetLabel, Vec<WeightedEdge>> = IndexMap::new();
    for edge in edges {
        groups.entry(edge.target.clone()).or_default().push(edge);
    }

    // Seeded once per call, one draw per edge, groups visited in
    // first-appearance order.
    let mut rng = DeterministicRng::new(seed);
    let mut capped = Vec::new();

    for (_, mut group) in groups {
        match tiebreak {
            Tiebreak::None => {
                group.sort_by(|a, b| b.weight.cmp(&a.weight));
            }
            Tiebreak::Alphabetical => {
                group.sort_by(|a, b| {
                    b.weight.cmp(&a.weight).then_with(|| a.source.cmp(&b.source))
                });
            }
            Tiebreak::SeededRandom => {
                let mut keyed: Vec<(u64, WeightedEdge)> = group
                    .into_iter()
                    .map(|edge| (rng.next_u64(), edge))
                    .collect();
                keyed.sort_by(|(a_key, a), (b_key, b)| {
                    b.weight.cmp(&a.weight).then_with(|| a_key.cmp(b_key))
                });
                group = keyed.into_iter().map(|(_, edge)| edge).collect();
            }
        }
        group.truncate(max_sources);
        capped.extend(group);
    }

    capped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tied_edges() -> Vec<WeightedEdge> {
        vec![
            WeightedEdge::new("A", "X", 2),
            WeightedEdge::new("B", "X", 2),
            WeightedEdge::new("C", "X", 1),
        ]
    }

    #[test]
    fn alphabetical_tiebreak_prefers_first_label() {
        let kept = cap_sources_per_target(tied_edges(), Some(1), Tiebreak::Alphabetical, 0);
        assert_eq!(kept, vec![WeightedEdge::new("A", "X", 2)]);
    }

    #[test]
    fn cap_bounds_distinct_sources_per_target() {
        let edges = vec![
            WeightedEdge::new("A", "X", 3),
            WeightedEdge::new("B", "X", 2),
            WeightedEdge::new("C", "X", 1),
            WeightedEdge::new("A", "Y", 2),
            WeightedEdge::new("B", "Y", 1),
        ];
        let kept = cap_sources_per_target(edges, Some(2), Tiebreak::Alphabetical, 0);
        for target in ["X", "Y"] {
            let sources = kept
                .iter()
                .filter(|edge| edge.target == target)
                .map(|edge| edge.source.as_str())
                .collect::<Vec<_>>();
            assert!(sources.len() <= 2, "target {target} kept {sources:?}");
        }
        // Weight order wins before any tie-break.
        assert_eq!(kept[0], WeightedEdge::new("A", "X", 3));
    }

    #[test]
    fn disabled_cap_is_identity() {
        assert_eq!(
            cap_sources_per_target(tied_edges(), None, Tiebreak::Alphabetical, 0),
            tied_edges()
        );
        assert_eq!(
            cap_sources_per_target(tied_edges(), Some(0), Tiebreak::Alphabetical, 0),
            tied_edges()
        );
    }

    #[test]
    fn seeded_tiebreak_is_deterministic_for_fixed_seed() {
        let first = cap_sources_per_target(tied_edges(), Some(1), Tiebreak::SeededRandom, 42);
        let second = cap_sources_per_target(tied_edges(), Some(1), Tiebreak::SeededRandom, 42);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].weight, 2);
        assert!(["A", "B"].contains(&first[0].source.as_str()));
    }

    #[test]
    fn untouched_targets_keep_relative_order() {
        let edges = vec![
            WeightedEdge::new("A", "X", 3),
            WeightedEdge::new("A", "Y", 2),
            WeightedEdge::new("B", "Z", 1),
        ];
        let kept = cap_sources_per_target(edges.clone(), Some(5), Tiebreak::Alphabetical, 0);
        assert_eq!(kept, edges);
    }

    #[test]
    fn deterministic_rng_stream_is_stable() {
        let mut a = DeterministicRng::new(7);
        let mut b = DeterministicRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
