use crate::{EdgeLabel, UnGraph};
use petgraph::graph::NodeIndex;

/// Complete graph on `k` vertices.
pub fn complete_graph(k: usize) -> UnGraph {
    let mut graph = UnGraph::new_undirected();
    for i in 0..k {
        graph.add_node(i as u32);
    }
    for i in 0..k {
        for j in (i + 1)..k {
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), EdgeLabel::Real);
        }
    }
    graph
}

/// Complete bipartite graph with sides of `a` and `b` vertices.
pub fn complete_bipartite(a: usize, b: usize) -> UnGraph {
    let mut graph = UnGraph::new_undirected();
    for i in 0..a + b {
        graph.add_node(i as u32);
    }
    for i in 0..a {
        for j in 0..b {
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(a + j), EdgeLabel::Real);
        }
    }
    graph
}

/// Path on `k` vertices.
pub fn path_graph(k: usize) -> UnGraph {
    let mut graph = UnGraph::new_undirected();
    for i in 0..k {
        graph.add_node(i as u32);
    }
    for i in 1..k {
        graph.add_edge(NodeIndex::new(i - 1), NodeIndex::new(i), EdgeLabel::Real);
    }
    graph
}

/// Cycle on `k` vertices.
pub fn cycle_graph(k: usize) -> UnGraph {
    let mut graph = path_graph(k);
    if k > 2 {
        graph.add_edge(NodeIndex::new(k - 1), NodeIndex::new(0), EdgeLabel::Real);
    }
    graph
}

/// Wheel: hub 0 joined to a rim cycle on vertices 1..=rim.
pub fn wheel_graph(rim: usize) -> UnGraph {
    let mut graph = UnGraph::new_undirected();
    for i in 0..=rim {
        graph.add_node(i as u32);
    }
    for i in 1..=rim {
        graph.add_edge(NodeIndex::new(0), NodeIndex::new(i), EdgeLabel::Real);
        let next = if i == rim { 1 } else { i + 1 };
        graph.add_edge(NodeIndex::new(i), NodeIndex::new(next), EdgeLabel::Real);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(complete_graph(5).edge_count(), 10);
        assert_eq!(complete_bipartite(3, 3).edge_count(), 9);
        assert_eq!(path_graph(4).edge_count(), 3);
        assert_eq!(cycle_graph(5).edge_count(), 5);
        assert_eq!(wheel_graph(5).edge_count(), 10);
        assert_eq!(wheel_graph(5).node_count(), 6);
    }
}
