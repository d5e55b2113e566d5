#![warn(missing_docs)]

//! # planar_embed
//!
//! A Rust library implementing the Boyer-Myrvold edge-addition method for
//! planarity testing and combinatorial embedding, with outerplanarity,
//! visibility spans and targeted K3,3/K2,3 searches on top.
//!
//! Based on [`petgraph`](https://docs.rs/petgraph) at the boundary: graphs
//! come in as `UnGraph`, embeddings and obstructions go out as `DiGraph`.
//! The engine itself runs on a flat-array store ([`EmbedGraph`]) with one
//! virtual root-copy slot per vertex and twin-paired arc slots.
//!
//! Reference:
//! [On the Cutting Edge: Simplified O(n) Planarity by Edge Addition](https://doi.org/10.7155/jgaa.00091)

pub mod debugging;
pub mod embedder;
pub mod embedder_blocks;
pub mod input;
pub mod obstruction;
pub mod output;
pub mod searcher;
pub mod testing;
pub mod types;
pub mod visibility;

pub use embedder::{embed, is_outerplanar, is_planar};
pub use embedder_blocks::integrity::test_embed_result_integrity;
pub use embedder_blocks::structures::EmbedGraph;
pub use types::DiGraph;
pub use types::EdgeLabel;
pub use types::EmbedMode;
pub use types::MinorType;
pub use types::Outcome;
pub use types::UnGraph;
