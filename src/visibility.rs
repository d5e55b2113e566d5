use crate::embedder_blocks::structures::{EmbedGraph, NIL};

/// Visibility span data of a finished embedding, produced by the
/// draw-planar mode.
///
/// Every vertex gets a horizontal span at its DFS-tree depth and every edge
/// a distinct column crossing the levels of its endpoints. Indices follow
/// the store's vertex order at computation time (DFI order); edges are
/// indexed by arc pair, matching `arcs[2k]`/`arcs[2k + 1]`.
#[derive(Debug, Clone)]
pub struct VisibilityRep {
    pub vertex_y: Vec<usize>,
    pub vertex_span: Vec<(usize, usize)>,
    pub edge_x: Vec<usize>,
    pub edge_y: Vec<(usize, usize)>,
}

/// Derives the spans from the embedded adjacency lists: a left-to-right
/// walk over the rotation orders assigns each edge the next free column,
/// and a vertex spans every column of its incident edges.
pub fn compute(g: &EmbedGraph) -> VisibilityRep {
    let n = g.n;
    let mut vertex_y = vec![0usize; n];
    for v in 0..n {
        let p = g.verts[v].parent;
        if p != NIL {
            vertex_y[v] = vertex_y[p] + 1;
        }
    }

    let mut edge_x = vec![NIL; g.m];
    let mut edge_y = vec![(0usize, 0usize); g.m];
    let mut next_col = 0;
    for u in 0..n {
        let mut j = g.verts[u].first_arc;
        while j != NIL {
            let k = j / 2;
            if edge_x[k] == NIL {
                let v = g.arcs[j].neighbor;
                edge_x[k] = next_col;
                next_col += 1;
                let (a, b) = (vertex_y[u], vertex_y[v]);
                edge_y[k] = (a.min(b), a.max(b));
            }
            j = g.arcs[j].next;
        }
    }

    let mut vertex_span = vec![(NIL, NIL); n];
    for u in 0..n {
        let mut j = g.verts[u].first_arc;
        while j != NIL {
            let x = edge_x[j / 2];
            let (lo, hi) = vertex_span[u];
            vertex_span[u] = if lo == NIL {
                (x, x)
            } else {
                (lo.min(x), hi.max(x))
            };
            j = g.arcs[j].next;
        }
        if vertex_span[u].0 == NIL {
            // a vertex with no edges still occupies a column of its own
            vertex_span[u] = (next_col, next_col);
            next_col += 1;
        }
    }

    VisibilityRep {
        vertex_y,
        vertex_span,
        edge_x,
        edge_y,
    }
}

#[cfg(test)]
mod tests {
    use crate::embedder::embed;
    use crate::embedder_blocks::structures::EmbedGraph;
    use crate::testing::classic::complete_graph;
    use crate::testing::grids::generate_grid_graph;
    use crate::types::{EmbedMode, Outcome};

    fn draw(graph: &crate::types::UnGraph) -> (EmbedGraph, super::VisibilityRep) {
        let mut g = EmbedGraph::from_graph(graph);
        assert_eq!(embed(&mut g, EmbedMode::DrawPlanar), Outcome::Ok);
        let rep = g.visibility.clone().expect("Draw mode fills the spans in");
        (g, rep)
    }

    #[test]
    fn test_edge_columns_fit_endpoint_spans() {
        let (g, rep) = draw(&complete_graph(4));
        assert_eq!(rep.edge_x.len(), g.m);
        for k in 0..g.m {
            let u = g.arcs[2 * k + 1].neighbor;
            let v = g.arcs[2 * k].neighbor;
            let x = rep.edge_x[k];
            for w in [u, v] {
                let (lo, hi) = rep.vertex_span[w];
                assert!(lo <= x && x <= hi);
            }
            let (ylo, yhi) = rep.edge_y[k];
            assert!(ylo <= yhi);
            assert_eq!(ylo, rep.vertex_y[u].min(rep.vertex_y[v]));
        }
    }

    #[test]
    fn test_columns_are_distinct() {
        let (g, rep) = draw(&generate_grid_graph(3, 4));
        let mut cols = rep.edge_x.clone();
        cols.sort();
        cols.dedup();
        assert_eq!(cols.len(), g.m);
    }

    #[test]
    fn test_planar_mode_skips_spans() {
        let mut g = EmbedGraph::from_graph(&complete_graph(4));
        assert_eq!(embed(&mut g, EmbedMode::Planar), Outcome::Ok);
        assert!(g.visibility.is_none());
    }
}
