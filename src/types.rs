/// Enum representing the role of an edge in a graph.
///
/// Input graphs carry `Real` edges only. An embedding emitted by
/// [`crate::EmbedGraph::to_graph`] labels each arc by the role the
/// depth-first search gave its edge: `Tree` for DFS-tree arcs, `Back` for
/// embedded back edges.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EdgeLabel {
    Real,
    Tree,
    Back,
}

impl std::fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeLabel::Real => write!(f, "Real"),
            EdgeLabel::Tree => write!(f, "Tree"),
            EdgeLabel::Back => write!(f, "Back"),
        }
    }
}

/// Wrapper for petgraph's graph type.
pub type UnGraph = petgraph::graph::UnGraph<u32, EdgeLabel>;
pub type DiGraph = petgraph::graph::DiGraph<u32, EdgeLabel>;

/// Embedding discipline requested from [`crate::embedder::embed`].
///
/// Exactly one mode is active per call. `Planar` asks for a spherical
/// embedding, `Outerplanar` additionally keeps every vertex on the outer
/// face, `DrawPlanar` is planarity plus visibility span data.
///
/// The two search modes run their base embedding inside the engine; the
/// found/not-found protocol on top of them lives in `mod searcher`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EmbedMode {
    Planar,
    Outerplanar,
    DrawPlanar,
    SearchK23,
    SearchK33,
}

impl EmbedMode {
    /// The base embedding discipline this mode runs on.
    pub fn base(self) -> EmbedMode {
        match self {
            EmbedMode::SearchK33 => EmbedMode::Planar,
            EmbedMode::SearchK23 => EmbedMode::Outerplanar,
            other => other,
        }
    }
}

/// Three-outcome protocol shared by every engine layer.
///
/// `Nonembeddable` is not an error from the caller's point of view: the
/// graph is left in a state from which an obstruction can be extracted.
/// `Internal` means an invariant failed; the graph must be reinitialized
/// before further use.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Ok,
    Nonembeddable,
    Internal,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ok => write!(f, "Ok"),
            Outcome::Nonembeddable => write!(f, "Nonembeddable"),
            Outcome::Internal => write!(f, "Internal"),
        }
    }
}

/// Which Kuratowski-style configuration an isolated obstruction contracts to.
///
/// `A` tags the K5 class and `E` the K3,3 class of planarity obstructions;
/// `K4` and `K23` tag the outerplanarity pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MinorType {
    A,
    E,
    K4,
    K23,
}

impl std::fmt::Display for MinorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MinorType::A => write!(f, "A"),
            MinorType::E => write!(f, "E"),
            MinorType::K4 => write!(f, "K4"),
            MinorType::K23 => write!(f, "K23"),
        }
    }
}
