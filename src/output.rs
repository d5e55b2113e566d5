use crate::UnGraph;
use petgraph::dot::{Config, Dot};
use petgraph::visit::EdgeRef;

/// Wrapper for petgraph::dot::Dot.
///
/// It shows your nodes labels, not petgraph's internal indices.
///
/// Takes input graphs and embedding outputs alike: back arcs are dashed,
/// tree arcs and plain input edges are solid.
pub fn to_dot_str<Ty: petgraph::EdgeType>(graph: &petgraph::Graph<u32, crate::EdgeLabel, Ty>) -> String {
    Dot::with_attr_getters(
        graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, edge_ref| {
            return if *edge_ref.weight() == crate::EdgeLabel::Back {
                "style=dashed".to_string()
            } else {
                "style=solid".to_string()
            };
        },
        &|g, node_ref| {
            format!(
                "label=\"{}\", style=filled, fillcolor=lightblue",
                g.node_weight(node_ref.0).unwrap()
            )
        },
    )
    .to_string()
}

/// Writes the graph to a file in DOT format.
pub fn to_dot_file<Ty: petgraph::EdgeType>(
    graph: &petgraph::Graph<u32, crate::EdgeLabel, Ty>,
    path: &str,
) {
    to_file(&to_dot_str(graph), path);
}

/// Writes a string to a file.
pub fn to_file(content: &str, path: &str) {
    std::fs::write(path, content).expect("Rust should write to file");
}

/// The adjacency-list format: "N=n" header, one "`i: n1 n2 ... -1`" line
/// per vertex, and the "`n: -1`" end mark.
pub fn to_adjacency_list_str(graph: &UnGraph) -> String {
    let n = graph.node_count();
    let mut out = format!("N={}\n", n);
    for i in 0..n {
        out.push_str(&format!("{}:", i));
        for w in graph.neighbors(petgraph::graph::NodeIndex::new(i)) {
            out.push_str(&format!(" {}", w.index()));
        }
        out.push_str(" -1\n");
    }
    out.push_str(&format!("{}: -1\n", n));
    out
}

/// The adjacency-matrix format: a vertex count line, then n rows of n
/// ASCII bits.
pub fn to_adjacency_matrix_str(graph: &UnGraph) -> String {
    let n = graph.node_count();
    let mut bits = vec![vec![b'0'; n]; n];
    for e in graph.edge_references() {
        let (u, v) = (e.source().index(), e.target().index());
        if u != v {
            bits[u][v] = b'1';
            bits[v][u] = b'1';
        }
    }
    let mut out = format!("{}\n", n);
    for row in bits {
        out.push_str(std::str::from_utf8(&row).unwrap());
        out.push('\n');
    }
    out
}

/// The test-capture format: the graph name, one 1-based "`u v`" pair per
/// edge, and the "`0 0`" terminator.
pub fn to_test_capture_str(graph: &UnGraph, name: &str) -> String {
    let mut out = format!("{}\n", name);
    for e in graph.edge_references() {
        out.push_str(&format!(
            "{} {}\n",
            e.source().index() + 1,
            e.target().index() + 1
        ));
    }
    out.push_str("0 0\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{
        from_adjacency_list_str, from_adjacency_matrix_str, from_test_capture_str,
    };
    use crate::testing::classic::{complete_graph, wheel_graph};

    fn edge_set(graph: &UnGraph) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = graph
            .edge_references()
            .map(|e| {
                let (a, b) = (e.source().index(), e.target().index());
                (a.min(b), a.max(b))
            })
            .collect();
        edges.sort();
        edges
    }

    #[test]
    fn test_adjacency_list_round_trip() {
        let g = wheel_graph(5);
        let text = to_adjacency_list_str(&g);
        let back = from_adjacency_list_str(&text);
        assert_eq!(back.node_count(), g.node_count());
        assert_eq!(edge_set(&back), edge_set(&g));
    }

    #[test]
    fn test_adjacency_matrix_round_trip() {
        let g = complete_graph(5);
        let back = from_adjacency_matrix_str(&to_adjacency_matrix_str(&g));
        assert_eq!(back.node_count(), 5);
        assert_eq!(edge_set(&back), edge_set(&g));
    }

    #[test]
    fn test_test_capture_round_trip() {
        let g = complete_graph(4);
        let text = to_test_capture_str(&g, "k4");
        let (name, back) = from_test_capture_str(&text);
        assert_eq!(name, "k4");
        assert_eq!(edge_set(&back), edge_set(&g));
    }

    #[test]
    fn test_dot_styles_arcs_by_role() {
        // an input graph renders all solid
        let s = to_dot_str(&complete_graph(4));
        assert!(s.contains("style=solid"));
        assert!(!s.contains("style=dashed"));
        // an embedding has its back arcs dashed
        let mut g = crate::EmbedGraph::from_graph(&complete_graph(4));
        assert_eq!(
            crate::embedder::embed(&mut g, crate::EmbedMode::Planar),
            crate::Outcome::Ok
        );
        let s = to_dot_str(&g.to_graph());
        assert!(s.contains("style=solid"));
        assert!(s.contains("style=dashed"));
    }

    #[test]
    fn test_capture_is_bit_exact() {
        let mut g = UnGraph::new_undirected();
        for i in 0..3 {
            g.add_node(i);
        }
        g.add_edge(0.into(), 1.into(), crate::EdgeLabel::Real);
        g.add_edge(1.into(), 2.into(), crate::EdgeLabel::Real);
        assert_eq!(to_test_capture_str(&g, "path"), "path\n1 2\n2 3\n0 0\n");
    }
}
