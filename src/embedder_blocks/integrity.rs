use fixedbitset::FixedBitSet;
use hashbrown::HashSet;
use petgraph::visit::EdgeRef;

use crate::embedder_blocks::structures::{EmbedGraph, NIL, twin};
use crate::obstruction;
use crate::types::{EmbedMode, Outcome, UnGraph};

/// Verifies an embed result against the graph it was loaded from.
///
/// For `Ok` the embedded arc set must equal the original's simple edges and
/// the face count must satisfy Euler's relation per connected component;
/// outerplanar embeddings additionally need one face per component touching
/// all of its vertices. For `Nonembeddable` the supplied obstruction must
/// be a subgraph of the original, itself nonembeddable under the mode, and
/// shaped like the right minor.
///
/// Returns `Ok` when every check passes, `Internal` otherwise.
pub fn test_embed_result_integrity(
    g: &EmbedGraph,
    original: &UnGraph,
    mode: EmbedMode,
    result: Outcome,
    obstruction: Option<&UnGraph>,
) -> Outcome {
    match result {
        Outcome::Ok => check_embedding(g, original, mode),
        Outcome::Nonembeddable => check_obstruction(original, mode, obstruction),
        Outcome::Internal => Outcome::Ok,
    }
}

fn canonical_edges(original: &UnGraph, n: usize) -> Vec<u64> {
    let mut set = HashSet::new();
    for e in original.edge_references() {
        let (a, b) = (e.source().index(), e.target().index());
        if a == b {
            continue;
        }
        let (lo, hi) = (a.min(b), a.max(b));
        set.insert((lo * 2 * n.max(1) + hi) as u64);
    }
    let mut keys: Vec<u64> = set.into_iter().collect();
    radsort::sort(&mut keys);
    keys
}

fn check_embedding(g: &EmbedGraph, original: &UnGraph, mode: EmbedMode) -> Outcome {
    let n = g.n;
    if original.node_count() != n {
        return Outcome::Internal;
    }

    // the embedded arcs carry exactly the original's simple edges
    let mut keys = Vec::with_capacity(g.m);
    for k in 0..g.m {
        let a = g.label_of(g.arcs[2 * k + 1].neighbor);
        let b = g.label_of(g.arcs[2 * k].neighbor);
        if a >= n || b >= n {
            return Outcome::Internal;
        }
        let (lo, hi) = (a.min(b), a.max(b));
        keys.push((lo * 2 * n.max(1) + hi) as u64);
    }
    radsort::sort(&mut keys);
    if keys != canonical_edges(original, n) {
        return Outcome::Internal;
    }

    // arcs must all be threaded into adjacency lists
    let total: usize = (0..n).map(|v| g.degree(v)).sum();
    if total != 2 * g.m {
        return Outcome::Internal;
    }

    let comp = components(g);
    let comp_count = comp.iter().copied().max().map_or(0, |c| c + 1);
    let faces = match face_orbits(g) {
        Some(f) => f,
        None => return Outcome::Internal,
    };
    // Euler per component, summed: V - E + F = 2C; an isolated vertex has
    // one face no arc orbit reaches
    let isolated = (0..n).filter(|&v| g.verts[v].first_arc == NIL).count();
    let f_total = faces.len() + isolated;
    if n + f_total != 2 * comp_count + g.m {
        return Outcome::Internal;
    }

    if mode.base() == EmbedMode::Outerplanar {
        // one face per component must visit all of its vertices
        let mut comp_size = vec![0usize; comp_count];
        for v in 0..n {
            comp_size[comp[v]] += 1;
        }
        let mut covered = vec![false; comp_count];
        for face in &faces {
            let mut verts: Vec<usize> = face.clone();
            radsort::sort(&mut verts);
            verts.dedup();
            if verts.is_empty() {
                continue;
            }
            let c = comp[verts[0]];
            if verts.len() == comp_size[c] {
                covered[c] = true;
            }
        }
        for c in 0..comp_count {
            if comp_size[c] > 1 && !covered[c] {
                return Outcome::Internal;
            }
        }
    }

    Outcome::Ok
}

/// Face orbits of the embedding: from an arc into `v`, the walk continues
/// with the cyclic successor of its twin in `v`'s rotation. Returns the
/// vertex sequence per orbit, or `None` when the walk does not close
/// properly.
fn face_orbits(g: &EmbedGraph) -> Option<Vec<Vec<usize>>> {
    let mut seen = FixedBitSet::with_capacity(2 * g.m.max(1));
    let mut orbits = Vec::new();
    for start in 0..2 * g.m {
        if seen.contains(start) {
            continue;
        }
        let mut orbit = Vec::new();
        let mut j = start;
        let mut steps = 0;
        loop {
            if steps > 2 * g.m {
                return None;
            }
            steps += 1;
            seen.insert(j);
            let v = g.arcs[j].neighbor;
            orbit.push(v);
            let t = twin(j);
            let nx = g.arcs[t].next;
            j = if nx == NIL { g.verts[v].first_arc } else { nx };
            if j == start {
                break;
            }
        }
        orbits.push(orbit);
    }
    Some(orbits)
}

fn components(g: &EmbedGraph) -> Vec<usize> {
    let n = g.n;
    let mut comp = vec![NIL; n];
    let mut count = 0;
    let mut stack = Vec::new();
    for s in 0..n {
        if comp[s] != NIL {
            continue;
        }
        comp[s] = count;
        stack.push(s);
        while let Some(v) = stack.pop() {
            let mut j = g.verts[v].first_arc;
            while j != NIL {
                let w = g.arcs[j].neighbor;
                if w < n && comp[w] == NIL {
                    comp[w] = count;
                    stack.push(w);
                }
                j = g.arcs[j].next;
            }
        }
        count += 1;
    }
    comp
}

fn check_obstruction(
    original: &UnGraph,
    mode: EmbedMode,
    obstruction: Option<&UnGraph>,
) -> Outcome {
    let obs = match obstruction {
        Some(o) => o,
        // a blocked embedding without an isolated witness is still a valid
        // nonembeddable report
        None => return Outcome::Ok,
    };
    let mut original_edges = HashSet::new();
    for e in original.edge_references() {
        let (a, b) = (e.source().index(), e.target().index());
        original_edges.insert((a.min(b), a.max(b)));
    }
    for e in obs.edge_references() {
        let (a, b) = (e.source().index(), e.target().index());
        if !original_edges.contains(&(a.min(b), a.max(b))) {
            return Outcome::Internal;
        }
    }
    let still_blocked = match mode.base() {
        EmbedMode::Outerplanar => !crate::embedder::is_outerplanar(obs, false).0,
        _ => !crate::embedder::is_planar(obs, false).0,
    };
    if !still_blocked {
        return Outcome::Internal;
    }
    match obstruction::classify(obs, mode) {
        Some(_) => Outcome::Ok,
        None => Outcome::Internal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::embed;
    use crate::testing::classic::{complete_graph, cycle_graph, wheel_graph};
    use crate::testing::grids::generate_grid_graph;

    fn checked_embed(graph: &UnGraph, mode: EmbedMode) -> Outcome {
        let mut g = EmbedGraph::from_graph(graph);
        let rc = embed(&mut g, mode);
        assert_eq!(
            test_embed_result_integrity(&g, graph, mode, rc, None),
            Outcome::Ok
        );
        rc
    }

    #[test]
    fn test_face_count_of_k4() {
        let k4 = complete_graph(4);
        let mut g = EmbedGraph::from_graph(&k4);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        let faces = face_orbits(&g).expect("Face walk should close");
        assert_eq!(faces.len(), 4);
    }

    #[test]
    fn test_face_count_of_cycle() {
        let c = cycle_graph(6);
        let mut g = EmbedGraph::from_graph(&c);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        assert_eq!(face_orbits(&g).unwrap().len(), 2);
    }

    #[test]
    fn test_integrity_over_scenarios() {
        assert_eq!(checked_embed(&complete_graph(4), EmbedMode::Planar), Outcome::Ok);
        assert_eq!(
            checked_embed(&complete_graph(5), EmbedMode::Planar),
            Outcome::Nonembeddable
        );
        assert_eq!(
            checked_embed(&wheel_graph(5), EmbedMode::Outerplanar),
            Outcome::Nonembeddable
        );
        assert_eq!(
            checked_embed(&generate_grid_graph(4, 5), EmbedMode::Planar),
            Outcome::Ok
        );
        assert_eq!(
            checked_embed(&cycle_graph(8), EmbedMode::Outerplanar),
            Outcome::Ok
        );
    }

    #[test]
    fn test_face_count_survives_a_flip() {
        // embedding this graph flips one bicomp; Euler only holds if the
        // orientation pass undoes the mirror image
        let mut graph = UnGraph::new_undirected();
        for i in 0..5u32 {
            graph.add_node(i);
        }
        for (u, v) in [(4, 0), (0, 1), (1, 3), (1, 2), (4, 2), (2, 3), (3, 4)] {
            graph.add_edge(
                petgraph::graph::NodeIndex::new(u),
                petgraph::graph::NodeIndex::new(v),
                crate::EdgeLabel::Real,
            );
        }
        let mut g = EmbedGraph::from_graph(&graph);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        assert_eq!(face_orbits(&g).unwrap().len(), 4);
        assert_eq!(
            test_embed_result_integrity(&g, &graph, EmbedMode::Planar, Outcome::Ok, None),
            Outcome::Ok
        );
    }

    #[test]
    fn test_obstruction_validity_for_k5() {
        let k5 = complete_graph(5);
        let obs = obstruction::isolate(&k5, EmbedMode::Planar).expect("K5 is not planar");
        let mut g = EmbedGraph::from_graph(&k5);
        let rc = embed(&mut g, EmbedMode::Planar);
        assert_eq!(
            test_embed_result_integrity(&g, &k5, EmbedMode::Planar, rc, Some(&obs)),
            Outcome::Ok
        );
    }

    #[test]
    fn test_exhaustive_small_graph_sweep() {
        use crate::testing::graph_enumerator::GraphEnumeratorState;
        for n in 2..=5 {
            let mut nonplanar = 0;
            for graph in GraphEnumeratorState::new(n) {
                let mut g = EmbedGraph::from_graph(&graph);
                let rc = embed(&mut g, EmbedMode::Planar);
                assert_ne!(rc, Outcome::Internal);
                assert_eq!(
                    test_embed_result_integrity(&g, &graph, EmbedMode::Planar, rc, None),
                    Outcome::Ok
                );
                if rc == Outcome::Nonembeddable {
                    nonplanar += 1;
                }
            }
            // K5 is the single nonplanar graph on up to five vertices
            assert_eq!(nonplanar, if n == 5 { 1 } else { 0 });
        }
    }

    #[test]
    fn test_exhaustive_outerplanar_sweep() {
        use crate::testing::graph_enumerator::GraphEnumeratorState;
        let mut blocked = 0;
        for graph in GraphEnumeratorState::new(4) {
            let mut g = EmbedGraph::from_graph(&graph);
            let rc = embed(&mut g, EmbedMode::Outerplanar);
            assert_ne!(rc, Outcome::Internal);
            assert_eq!(
                test_embed_result_integrity(&g, &graph, EmbedMode::Outerplanar, rc, None),
                Outcome::Ok
            );
            if rc == Outcome::Nonembeddable {
                blocked += 1;
            }
        }
        // K4 is the single non-outerplanar graph on four vertices
        assert_eq!(blocked, 1);
    }

    #[test]
    fn test_random_graph_sweep() {
        use crate::testing::random_graphs::random_graph;
        for i in 0..200 {
            let n = 2 + i / 10;
            let m = 1 + i;
            let graph = random_graph(n, m, i);
            for mode in [EmbedMode::Planar, EmbedMode::Outerplanar] {
                let mut g = EmbedGraph::from_graph(&graph);
                let rc = embed(&mut g, mode);
                assert_ne!(rc, Outcome::Internal);
                assert_eq!(
                    test_embed_result_integrity(&g, &graph, mode, rc, None),
                    Outcome::Ok,
                    "integrity failed for seed {} under {:?}",
                    i,
                    mode
                );
            }
        }
    }

    #[test]
    fn test_foreign_obstruction_is_rejected() {
        let k5 = complete_graph(5);
        // an obstruction with an edge the original does not have
        let obs = complete_graph(6);
        let mut g = EmbedGraph::from_graph(&k5);
        let rc = embed(&mut g, EmbedMode::Planar);
        assert_eq!(
            test_embed_result_integrity(&g, &k5, EmbedMode::Planar, rc, Some(&obs)),
            Outcome::Internal
        );
    }
}
