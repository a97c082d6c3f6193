//! Shortest-path verifier with pairwise-distance memoization.

use super::StepSink;
use crate::model::{Graph, pair_key};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Checks the distance-bounded coloring property via single-source shortest
/// paths: for every live vertex, run a unit-weight Dijkstra sweep and fail if
/// any other member of its color class settles within `max_distance` hops.
///
/// Distances between same-colored pairs are memoized across sources within
/// one run, keyed canonically by unordered pair, so each pair is computed at
/// most once. The cache acts purely as a skip-list for pairs already proven
/// safe: a cached distance above the bound pre-settles that member, while
/// anything else is re-validated by the forward sweep.
pub fn verify_dijkstra(g: &Graph, max_distance: u32, sink: &mut dyn StepSink) -> bool {
    let classes = g.color_classes();
    let mut cache: FxHashMap<(usize, usize), u32> = FxHashMap::default();

    for (source, vertex) in g.vertices() {
        let class = &classes[&vertex.color];
        if !source_clears_class(g, source, class, max_distance, &mut cache, sink) {
            debug!(
                source,
                color = vertex.color.hex(),
                "shortest-path sweep found a same-colored vertex in range"
            );
            return false;
        }
        sink.source_cleared(source);
    }
    true
}

fn source_clears_class(
    g: &Graph,
    source: usize,
    class: &[usize],
    max_distance: u32,
    cache: &mut FxHashMap<(usize, usize), u32>,
    sink: &mut dyn StepSink,
) -> bool {
    let members: FxHashSet<usize> = class.iter().copied().collect();

    // Members whose distance to this source is already known to exceed the
    // bound need neither re-checking nor reaching. They still participate in
    // relaxation; exemption only affects accounting.
    let mut exempt: FxHashSet<usize> = FxHashSet::default();
    for &m in class {
        if m != source
            && cache
                .get(&pair_key(source, m))
                .is_some_and(|&d| d > max_distance)
        {
            exempt.insert(m);
        }
    }
    // The source itself settles at distance zero and counts toward the goal.
    let goal = class.len() - exempt.len();

    let mut tentative: Vec<Option<u32>> = vec![None; g.slot_count()];
    tentative[source] = Some(0);
    let mut settled = vec![false; g.slot_count()];
    let mut accounted = 0;

    loop {
        // Select the unsettled vertex with the smallest tentative distance.
        let mut current: Option<(usize, u32)> = None;
        for (ix, d) in tentative.iter().enumerate() {
            if let Some(d) = *d {
                if !settled[ix] && current.map_or(true, |(_, best)| d < best) {
                    current = Some((ix, d));
                }
            }
        }
        // An empty frontier means the rest of the class is unreachable from
        // this source, which is safe.
        let Some((v, dist_v)) = current else {
            return true;
        };

        for (edge, other) in g.incident_edges(v) {
            sink.edge_examined(edge);
            if settled[other] {
                continue;
            }
            let candidate = dist_v + 1;
            if tentative[other].map_or(true, |d| candidate < d) {
                tentative[other] = Some(candidate);
            }
        }
        settled[v] = true;

        if members.contains(&v) && !exempt.contains(&v) {
            if v != source {
                if dist_v <= max_distance {
                    return false;
                }
                cache.insert(pair_key(source, v), dist_v);
            }
            accounted += 1;
            if accounted == goal {
                return true;
            }
        }
    }
}
