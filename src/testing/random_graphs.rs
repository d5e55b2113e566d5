use crate::EdgeLabel;
use crate::UnGraph;
use petgraph::visit::NodeIndexable;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seeded random connected graph: a random tree backbone plus `m - n + 1`
/// extra edges (possibly parallel or looping; the embedder deduplicates on
/// load).
pub fn random_graph(n: usize, m: usize, seed: usize) -> UnGraph {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = UnGraph::new_undirected();

    for i in 0..n {
        graph.add_node(i.try_into().unwrap());
        if i > 0 {
            let j = rng.random_range(0..i);
            graph.add_edge(graph.from_index(i), graph.from_index(j), EdgeLabel::Real);
        }
    }

    for _ in n - 1..m {
        let s = rng.random_range(0..n);
        let t = rng.random_range(0..n);
        graph.add_edge(graph.from_index(s), graph.from_index(t), EdgeLabel::Real);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_graph_is_seeded() {
        let a = random_graph(10, 15, 7);
        let b = random_graph(10, 15, 7);
        assert_eq!(a.edge_count(), b.edge_count());
        use petgraph::visit::EdgeRef;
        for (x, y) in a.edge_references().zip(b.edge_references()) {
            assert_eq!(x.source(), y.source());
            assert_eq!(x.target(), y.target());
        }
    }
}
