pub mod classic;
pub mod graph_enumerator;
pub mod grids;
pub mod random_graphs;
