use hashbrown::HashMap;
use petgraph::visit::EdgeRef;

use crate::embedder::{is_outerplanar, is_planar};
use crate::types::{EdgeLabel, EmbedMode, MinorType, UnGraph};

fn embeddable(graph: &UnGraph, mode: EmbedMode) -> bool {
    match mode.base() {
        EmbedMode::Outerplanar => is_outerplanar(graph, false).0,
        _ => is_planar(graph, false).0,
    }
}

/// Given a nonembeddable graph, extracts an edge-minimal witness subgraph:
/// a K5 or K3,3 homeomorph for planarity, a K4 or K2,3 homeomorph for
/// outerplanarity. Works in O(n^2) embeddings.
///
/// Returns `None` when the graph is embeddable. The witness keeps the
/// input's node indices.
pub fn isolate(graph: &UnGraph, mode: EmbedMode) -> Option<UnGraph> {
    if embeddable(graph, mode) {
        return None;
    }

    let mut remaining = graph.clone();
    let mut kept = UnGraph::new_undirected();
    for v in graph.node_indices() {
        kept.add_node(graph.node_weight(v).unwrap().clone());
    }

    while remaining.edge_count() > 0 {
        let eid = remaining.edge_indices().next().unwrap();
        let (u, v) = remaining.edge_endpoints(eid).unwrap();
        remaining.remove_edge(eid);

        let mut probe = remaining.clone();
        for e in kept.edge_references() {
            probe.add_edge(e.source(), e.target(), EdgeLabel::Real);
        }

        if embeddable(&probe, mode) {
            // this edge was load-bearing for the obstruction
            kept.add_edge(u, v, EdgeLabel::Real);
        }
    }

    assert!(!embeddable(&kept, mode));
    Some(kept)
}

/// Classifies an isolated obstruction by its branch-vertex degrees: five
/// degree-4 branch vertices mean a K5 homeomorph, six degree-3 a K3,3; for
/// outerplanarity four degree-3 branch vertices mean a K4 and two a K2,3.
/// Everything else is a shape no valid isolation produces, reported as
/// `None`.
pub fn classify(obstruction: &UnGraph, mode: EmbedMode) -> Option<MinorType> {
    let mut degree: HashMap<usize, usize> = HashMap::new();
    for e in obstruction.edge_references() {
        *degree.entry(e.source().index()).or_insert(0) += 1;
        *degree.entry(e.target().index()).or_insert(0) += 1;
    }
    let deg3 = degree.values().filter(|&&d| d == 3).count();
    let deg4 = degree.values().filter(|&&d| d == 4).count();
    let higher = degree.values().filter(|&&d| d > 4 || d == 1).count();
    if higher != 0 {
        return None;
    }
    match mode.base() {
        EmbedMode::Outerplanar => match (deg3, deg4) {
            (4, 0) => Some(MinorType::K4),
            (2, 0) => Some(MinorType::K23),
            _ => None,
        },
        _ => match (deg3, deg4) {
            (0, 5) => Some(MinorType::A),
            (6, 0) => Some(MinorType::E),
            _ => None,
        },
    }
}
