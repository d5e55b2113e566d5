use crate::EdgeLabel;
use crate::UnGraph;
use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};

/// This is equivalent to [`from_str`], but takes file path as an input.
pub fn from_file(path: &str) -> UnGraph {
    let file = File::open(path).expect("File should exist and be readable");
    let reader = BufReader::new(file);
    parse_edge_pairs(reader)
}

/// Reads a graph from a string of edge pairs.
///
/// - One line = one edge in format "u,v".
/// - You can number vertices with non-negative integers; the numbers become
///   node labels, internal indices run from 0 in label order.
///
/// Warning:
/// <div class="warning">
///
/// - Self-loops are parsed but ignored.
/// - Parallel edges are kept here; the embedder deduplicates them on load.
///
/// </div>
pub fn from_str(input: &str) -> UnGraph {
    parse_edge_pairs(BufReader::new(Cursor::new(input)))
}

fn parse_edge_pairs<R: BufRead>(reader: R) -> UnGraph {
    let mut edges = Vec::new();
    let mut node_ids = BTreeSet::<u32>::new();

    for line in reader.lines() {
        let line = line.expect("Line should be readable");
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let pair: Vec<_> = line.split(',').collect();
        if pair.len() != 2 {
            panic!("Wrong format, expected 'u,v' for an edge");
        }
        let u: u32 = pair[0]
            .parse()
            .expect("Node index should be a non-negative number");
        let v: u32 = pair[1]
            .parse()
            .expect("Node index should be a non-negative number");
        if u == v {
            continue;
        }
        node_ids.insert(u);
        node_ids.insert(v);
        edges.push((u, v));
    }

    let mut graph = UnGraph::new_undirected();
    let mut ids_to_internal = HashMap::<u32, NodeIndex>::new();
    for &id in &node_ids {
        ids_to_internal.insert(id, graph.add_node(id));
    }
    graph.extend_with_edges(
        edges
            .iter()
            .map(|&(u, v)| (ids_to_internal[&u], ids_to_internal[&v], EdgeLabel::Real)),
    );
    graph
}

/// Reads the adjacency-list format: a "N=n" header, one line per vertex
/// "`i: n1 n2 ... -1`" and the trailing "`n: -1`" end mark.
///
/// Each edge appears in both endpoint lines; duplicates collapse on read.
pub fn from_adjacency_list_str(input: &str) -> UnGraph {
    let mut lines = input.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().expect("Adjacency list should have a header");
    let n: usize = header
        .trim()
        .strip_prefix("N=")
        .expect("Header should have the form N=<count>")
        .parse()
        .expect("Vertex count should be a non-negative number");

    let mut edges = BTreeSet::new();
    for line in lines {
        let (head, rest) = line
            .split_once(':')
            .expect("Each row should have the form 'i: neighbors -1'");
        let i: usize = head.trim().parse().expect("Row index should be a number");
        if i == n {
            break;
        }
        assert!(i < n, "Row index out of range");
        for tok in rest.split_whitespace() {
            let v: isize = tok.parse().expect("Neighbor should be a number");
            if v == -1 {
                break;
            }
            let v = v as usize;
            assert!(v < n, "Neighbor index out of range");
            if v != i {
                edges.insert((i.min(v), i.max(v)));
            }
        }
    }

    build(n, edges.into_iter())
}

/// Reads the adjacency-matrix format: a vertex count line, then n rows of
/// n ASCII bits.
pub fn from_adjacency_matrix_str(input: &str) -> UnGraph {
    let mut lines = input.lines().filter(|l| !l.trim().is_empty());
    let n: usize = lines
        .next()
        .expect("Matrix should have a vertex count line")
        .trim()
        .parse()
        .expect("Vertex count should be a non-negative number");

    let mut edges = BTreeSet::new();
    for i in 0..n {
        let row = lines.next().expect("Matrix should have n rows");
        let row = row.trim();
        assert_eq!(row.len(), n, "Matrix rows should have n bits");
        for (j, c) in row.chars().enumerate() {
            match c {
                '0' => {}
                '1' => {
                    if i != j {
                        edges.insert((i.min(j), i.max(j)));
                    }
                }
                _ => panic!("Matrix entries should be ASCII bits"),
            }
        }
    }

    build(n, edges.into_iter())
}

/// Reads a test capture: a name line, one 1-based "`u v`" pair per line,
/// terminated by "`0 0`". Returns the name together with the graph; the
/// vertex count is the largest index seen.
pub fn from_test_capture_str(input: &str) -> (String, UnGraph) {
    let mut lines = input.lines();
    let name = lines
        .next()
        .expect("Capture should start with a graph name")
        .trim()
        .to_string();

    let mut edges = BTreeSet::new();
    let mut n = 0;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (a, b) = line
            .split_once(' ')
            .expect("Capture rows should be 'u v' pairs");
        let u: usize = a.trim().parse().expect("Endpoint should be a number");
        let v: usize = b.trim().parse().expect("Endpoint should be a number");
        if u == 0 && v == 0 {
            break;
        }
        assert!(u > 0 && v > 0, "Capture endpoints are 1-based");
        n = n.max(u).max(v);
        if u != v {
            edges.insert((u.min(v) - 1, u.max(v) - 1));
        }
    }

    (name, build(n, edges.into_iter()))
}

fn build(n: usize, edges: impl Iterator<Item = (usize, usize)>) -> UnGraph {
    let mut graph = UnGraph::new_undirected();
    for i in 0..n {
        graph.add_node(i as u32);
    }
    for (u, v) in edges {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), EdgeLabel::Real);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_empty() {
        let graph = from_str("");
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_from_str_simple() {
        let graph = from_str("1,2\n2,3\n");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(0.into(), 1.into()));
        assert!(graph.contains_edge(1.into(), 2.into()));
    }

    #[test]
    fn test_from_str_with_self_loops() {
        let graph = from_str("1,2\n2,3\n3,3\n");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_adjacency_list_parsing() {
        let input = "N=4\n0: 1 2 -1\n1: 0 -1\n2: 0 3 -1\n3: 2 -1\n4: -1\n";
        let graph = from_adjacency_list_str(input);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.contains_edge(0.into(), 1.into()));
        assert!(graph.contains_edge(0.into(), 2.into()));
        assert!(graph.contains_edge(2.into(), 3.into()));
    }

    #[test]
    fn test_adjacency_matrix_parsing() {
        let input = "3\n011\n101\n110\n";
        let graph = from_adjacency_matrix_str(input);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_test_capture_parsing() {
        let input = "triangle\n1 2\n2 3\n3 1\n0 0\n";
        let (name, graph) = from_test_capture_str(input);
        assert_eq!(name, "triangle");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }
}
