use crate::embedder_blocks::mode::mode_ops;
use crate::embedder_blocks::preprocess::embed_prepare;
use crate::embedder_blocks::structures::{EmbedGraph, NIL};
use crate::embedder_blocks::walkdown::walk_down;
use crate::embedder_blocks::walkup::walk_up;
use crate::obstruction;
use crate::types::{DiGraph, EdgeLabel, EmbedMode, Outcome, UnGraph};

/// Embeds the graph under the given mode.
///
/// Runs the preprocessing, then one step per vertex in reverse DFI order:
/// walkups establish which descendants are pertinent, walkdowns embed the
/// back edges into each pertinent child bicomp, and a step that cannot
/// clear its forward-arc list ends the embedding as `Nonembeddable`. On
/// success the mode's postprocess finalizes orientation and joins the
/// residual bicomps; on a blockage the graph state is left for the
/// obstruction isolator.
///
/// The graph must be freshly loaded; call
/// [`EmbedGraph::reinitialize`] and re-add the edges before embedding
/// again.
pub fn embed(g: &mut EmbedGraph, mode: EmbedMode) -> Outcome {
    let ops = mode_ops(mode);
    if g.embedded {
        return Outcome::Internal;
    }
    let rc = embed_prepare(g);
    if rc != Outcome::Ok {
        return rc;
    }
    g.embedded = true;

    if g.m > ops.edge_bound(g.n) {
        return ops.embed_postprocess(g, Outcome::Nonembeddable);
    }

    let mut result = Outcome::Ok;
    for i in (0..g.n).rev() {
        g.verts[i].visited_info = g.n;

        let head = g.verts[i].fwd_arc_list;
        let mut j = head;
        while j != NIL {
            walk_up(g, i, j);
            j = g.arcs[j].next;
            if j == head {
                break;
            }
        }

        let mut step_rc = Outcome::Ok;
        let mut child = g.verts[i].pertinent_bicomp_head;
        while child != NIL {
            step_rc = walk_down(g, ops, i, child + g.n);
            if step_rc != Outcome::Ok {
                break;
            }
            child = g
                .pertinent_bicomps
                .successor(g.verts[i].pertinent_bicomp_head, child);
        }
        if step_rc == Outcome::Internal {
            return Outcome::Internal;
        }
        g.verts[i].pertinent_bicomp_head = NIL;

        if g.verts[i].fwd_arc_list != NIL || step_rc == Outcome::Nonembeddable {
            if ops.handle_blocked_iteration(g, i) != Outcome::Ok {
                result = Outcome::Nonembeddable;
                break;
            }
        }
    }

    ops.embed_postprocess(g, result)
}

/// Tests planarity of a petgraph graph.
///
/// Returns whether the graph is planar together with a directed graph: the
/// combinatorial embedding (adjacency in rotation order, both arcs per
/// edge) when planar, or the isolated Kuratowski subgraph when not (empty
/// unless `with_obstruction` is set, since isolation re-runs the tester
/// per edge).
pub fn is_planar(graph: &UnGraph, with_obstruction: bool) -> (bool, DiGraph) {
    embeddable(graph, EmbedMode::Planar, with_obstruction)
}

/// Tests outerplanarity; the obstruction on failure is a K4 or K2,3
/// homeomorph.
pub fn is_outerplanar(graph: &UnGraph, with_obstruction: bool) -> (bool, DiGraph) {
    embeddable(graph, EmbedMode::Outerplanar, with_obstruction)
}

fn embeddable(graph: &UnGraph, mode: EmbedMode, with_obstruction: bool) -> (bool, DiGraph) {
    let mut g = EmbedGraph::from_graph(graph);
    match embed(&mut g, mode) {
        Outcome::Ok => {
            // report the embedding in the caller's vertex order
            g.sort_vertices();
            (true, g.to_graph())
        }
        _ => {
            let mut witness = DiGraph::new();
            for v in graph.node_indices() {
                witness.add_node(v.index() as u32);
            }
            if with_obstruction {
                if let Some(obs) = obstruction::isolate(graph, mode.base()) {
                    use petgraph::visit::EdgeRef;
                    for e in obs.edge_references() {
                        witness.add_edge(e.source(), e.target(), EdgeLabel::Real);
                        witness.add_edge(e.target(), e.source(), EdgeLabel::Real);
                    }
                }
            }
            (false, witness)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::classic::{
        complete_bipartite, complete_graph, cycle_graph, path_graph, wheel_graph,
    };
    use crate::testing::grids::generate_grid_graph;

    fn build(edges: &[(usize, usize)], n: usize) -> EmbedGraph {
        let mut g = EmbedGraph::new();
        g.init(n);
        for &(u, v) in edges {
            assert_eq!(g.add_edge(u, v), Outcome::Ok);
        }
        g
    }

    #[test]
    fn test_k4_planar() {
        let mut g = build(&[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)], 4);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        assert_eq!(g.m, 6);
        // every arc is back in some adjacency list
        let total: usize = (0..g.n).map(|v| g.degree(v)).sum();
        assert_eq!(total, 2 * g.m);
        // all virtual slots were reclaimed
        for r in g.n..2 * g.n {
            assert_eq!(g.verts[r].first_arc, crate::embedder_blocks::structures::NIL);
        }
    }

    #[test]
    fn test_k5_nonembeddable() {
        let (planar, _) = is_planar(&complete_graph(5), false);
        assert!(!planar);
    }

    #[test]
    fn test_k33_nonembeddable() {
        let (planar, _) = is_planar(&complete_bipartite(3, 3), false);
        assert!(!planar);
    }

    #[test]
    fn test_k5_minus_any_edge_is_planar() {
        let k5 = complete_graph(5);
        for skip in 0..k5.edge_count() {
            let mut g = EmbedGraph::new();
            g.init(5);
            for (idx, e) in k5.edge_indices().enumerate() {
                if idx == skip {
                    continue;
                }
                let (u, v) = k5.edge_endpoints(e).unwrap();
                g.add_edge(u.index(), v.index());
            }
            assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        }
    }

    #[test]
    fn test_path_planar_and_outerplanar() {
        let p4 = path_graph(4);
        assert!(is_planar(&p4, false).0);
        assert!(is_outerplanar(&p4, false).0);
    }

    #[test]
    fn test_wheel_planar_not_outerplanar() {
        let w5 = wheel_graph(5);
        assert!(is_planar(&w5, false).0);
        assert!(!is_outerplanar(&w5, false).0);
    }

    #[test]
    fn test_cycle_outerplanar() {
        assert!(is_outerplanar(&cycle_graph(7), false).0);
    }

    #[test]
    fn test_k4_not_outerplanar() {
        assert!(!is_outerplanar(&complete_graph(4), false).0);
    }

    #[test]
    fn test_embedding_with_forced_flip() {
        // the bicomp grown at step 2 is entered and left on the same side
        // during step 1, so the walkdown must flip it; the face count only
        // comes out right if the flip sign propagates through orientation
        let mut g = build(
            &[(4, 0), (0, 1), (1, 3), (1, 2), (4, 2), (2, 3), (3, 4)],
            5,
        );
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        let total: usize = (0..g.n).map(|v| g.degree(v)).sum();
        assert_eq!(total, 2 * g.m);
    }

    #[test]
    fn test_two_disjoint_triangles() {
        let mut g = build(&[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)], 6);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        assert_eq!(g.m, 6);
        let total: usize = (0..g.n).map(|v| g.degree(v)).sum();
        assert_eq!(total, 12);
    }

    #[test]
    fn test_grid_planar() {
        let grid = generate_grid_graph(6, 7);
        assert!(is_planar(&grid, false).0);
        // grids with both dimensions above one are not outerplanar
        assert!(!is_outerplanar(&grid, false).0);
    }

    #[test]
    fn test_embedding_is_reported_in_input_order() {
        let g = path_graph(5);
        let (planar, emb) = is_planar(&g, false);
        assert!(planar);
        assert_eq!(emb.node_count(), 5);
        assert_eq!(emb.edge_count(), 2 * g.edge_count());
        for v in emb.node_indices() {
            assert_eq!(*emb.node_weight(v).unwrap() as usize, v.index());
        }
    }

    #[test]
    fn test_embed_twice_without_reinit_is_rejected() {
        let mut g = build(&[(0, 1)], 2);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Internal);
    }

    #[test]
    fn test_reembedding_the_output() {
        // embed, read the embedding back, reload and embed again
        let mut g = build(&[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)], 4);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        g.sort_vertices();
        let emb = g.to_graph();
        g.reinitialize();
        for e in emb.edge_indices() {
            let (u, v) = emb.edge_endpoints(e).unwrap();
            if u.index() < v.index() {
                assert_eq!(g.add_edge(u.index(), v.index()), Outcome::Ok);
            }
        }
        assert_eq!(g.m, 6);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
    }

    #[test]
    fn test_dup_embeds_like_the_original() {
        let mut g = build(&[(0, 1), (1, 2), (2, 0), (2, 3)], 4);
        let mut d = g.dup();
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        assert_eq!(embed(&mut d, EmbedMode::Planar), Outcome::Ok);
    }

    #[test]
    fn test_sort_vertices_toggle() {
        let mut g = build(&[(0, 2), (2, 1), (1, 3), (3, 0)], 4);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        // the store is in DFI order after embedding
        for i in 0..g.n {
            assert_eq!(g.verts[i].index, i);
        }
        g.sort_vertices();
        assert!(!g.sorted_by_dfi);
        g.sort_vertices();
        assert!(g.sorted_by_dfi);
        for i in 0..g.n {
            assert_eq!(g.verts[i].index, i);
        }
    }

    #[test]
    #[ignore] // timing-sensitive; run with cargo test --release -- --ignored
    fn test_linear_scaling_on_grids() {
        use std::time::Instant;
        let sizes = [1_000usize, 10_000, 100_000];
        let mut times = Vec::new();
        for &n in &sizes {
            let grid = generate_grid_graph(n / 50, 50);
            let mut best = f64::MAX;
            for _ in 0..3 {
                let mut g = EmbedGraph::from_graph(&grid);
                let t = Instant::now();
                assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
                best = best.min(t.elapsed().as_secs_f64());
            }
            times.push(best);
        }
        let slope = (times[2].ln() - times[0].ln())
            / ((sizes[2] as f64).ln() - (sizes[0] as f64).ln());
        assert!(
            slope <= 1.2,
            "embedding should scale linearly, got log-log slope {:.3}",
            slope
        );
    }

    #[test]
    fn test_empty_and_trivial_graphs() {
        let mut g = EmbedGraph::new();
        g.init(0);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        let mut g = EmbedGraph::new();
        g.init(1);
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        let mut g = build(&[(0, 1)], 2);
        assert_eq!(embed(&mut g, EmbedMode::Outerplanar), Outcome::Ok);
    }
}
