use hashbrown::HashSet;
use petgraph::visit::EdgeRef;

use crate::obstruction;
use crate::types::{EmbedMode, MinorType, UnGraph};

/// Result of a targeted obstruction search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub found: bool,
    /// Homeomorph of the target obstruction, on the input's node indices.
    pub witness: Option<UnGraph>,
}

/// Searches for a K3,3 homeomorph: embed under planarity, isolate any
/// blockage, and reduce innocuous K5-shaped witnesses before searching on.
pub fn search_k33(graph: &UnGraph) -> SearchResult {
    search(graph, EmbedMode::SearchK33, MinorType::E)
}

/// Searches for a K2,3 homeomorph the same way, over outerplanarity with
/// K4-shaped witnesses as the innocuous kind.
pub fn search_k23(graph: &UnGraph) -> SearchResult {
    search(graph, EmbedMode::SearchK23, MinorType::K23)
}

fn search(graph: &UnGraph, mode: EmbedMode, target: MinorType) -> SearchResult {
    let mut seen = HashSet::new();
    match reduce(graph.clone(), mode, target, &mut seen) {
        Some(witness) => SearchResult {
            found: true,
            witness: Some(witness),
        },
        None => SearchResult {
            found: false,
            witness: None,
        },
    }
}

/// Reduction loop. An innocuous witness is dismantled by branching over
/// its edges: the target homeomorph has maximum degree three, so at every
/// degree-4 (or in the outerplanar case, every fourth degree-3) branch
/// vertex of the witness at least one incident edge lies outside any
/// target still present, and one of the branches keeps that target alive.
/// Each level removes an edge, so the recursion bottoms out; the seen set
/// collapses the orders in which the same edges get removed.
fn reduce(
    work: UnGraph,
    mode: EmbedMode,
    target: MinorType,
    seen: &mut HashSet<Vec<u64>>,
) -> Option<UnGraph> {
    if !seen.insert(edge_key(&work)) {
        return None;
    }
    let obs = obstruction::isolate(&work, mode.base())?;
    if obstruction::classify(&obs, mode) == Some(target) {
        return Some(obs);
    }
    for e in obs.edge_references() {
        let mut next = work.clone();
        let eid = next
            .find_edge(e.source(), e.target())
            .expect("The witness is a subgraph of the work graph");
        next.remove_edge(eid);
        if let Some(found) = reduce(next, mode, target, seen) {
            return Some(found);
        }
    }
    None
}

fn edge_key(graph: &UnGraph) -> Vec<u64> {
    let n = graph.node_count().max(1) as u64;
    let mut keys: Vec<u64> = graph
        .edge_references()
        .map(|e| {
            let (a, b) = (e.source().index() as u64, e.target().index() as u64);
            a.min(b) * 2 * n + a.max(b)
        })
        .collect();
    radsort::sort(&mut keys);
    keys
}
