use dot::{Edges, GraphWalk, Labeller, Nodes};

use crate::embedder_blocks::structures::{ArcType, EmbedGraph, NIL};

type Node = usize;

#[derive(Debug, Clone)]
struct Arc {
    id: usize,
    source: Node,
    target: Node,
    arc_type: ArcType,
    inverted: bool,
}

struct State<'a> {
    nodes: Vec<Node>,
    arcs: Vec<Arc>,
    g: &'a EmbedGraph,
}

impl<'a> Labeller<'a, Node, Arc> for State<'a> {
    fn graph_id(&self) -> dot::Id<'_> {
        dot::Id::new("E").unwrap()
    }

    fn node_id(&self, n: &Node) -> dot::Id<'_> {
        dot::Id::new(format!("V{}", n)).unwrap()
    }

    fn node_label(&self, n: &Node) -> dot::LabelText<'a> {
        let v = &self.g.verts[*n];
        if *n >= self.g.n {
            return dot::LabelText::label(format!("root {}", *n - self.g.n));
        }
        dot::LabelText::label(format!(
            "{}\ndfi:{} low:{} la:{}\nface:[{} {}]",
            self.g.label_of(*n),
            v.index,
            if v.lowpoint == NIL { 0 } else { v.lowpoint },
            if v.least_ancestor == NIL { 0 } else { v.least_ancestor },
            if v.ext_face[0] == NIL { 0 } else { v.ext_face[0] },
            if v.ext_face[1] == NIL { 0 } else { v.ext_face[1] },
        ))
    }

    fn edge_label(&self, e: &Arc) -> dot::LabelText<'a> {
        dot::LabelText::label(format!(
            "{} {:?}{}",
            e.id,
            e.arc_type,
            if e.inverted { " flip" } else { "" }
        ))
    }
}

impl<'a> GraphWalk<'a, Node, Arc> for State<'a> {
    fn nodes(&self) -> Nodes<'_, Node> {
        self.nodes.iter().cloned().collect()
    }

    fn edges(&self) -> Edges<'_, Arc> {
        self.arcs.as_slice().into()
    }

    fn source(&self, e: &Arc) -> Node {
        e.source
    }

    fn target(&self, e: &Arc) -> Node {
        e.target
    }
}

/// Renders the embedder state as DOT for inspection mid-algorithm: every
/// vertex slot with a non-empty adjacency list, its DFS numbers and
/// external-face links, and one directed edge per arc with its type.
pub fn draw_embedder_state(g: &EmbedGraph) -> String {
    let mut state = State {
        nodes: Vec::new(),
        arcs: Vec::new(),
        g,
    };

    for v in 0..2 * g.n {
        if v < g.n || g.verts[v].first_arc != NIL {
            state.nodes.push(v);
        }
        let mut j = g.verts[v].first_arc;
        while j != NIL {
            state.arcs.push(Arc {
                id: j,
                source: v,
                target: g.arcs[j].neighbor,
                arc_type: g.arcs[j].arc_type,
                inverted: g.arcs[j].inverted,
            });
            j = g.arcs[j].next;
        }
    }

    let mut buffer = std::io::Cursor::new(Vec::new());
    dot::render(&state, &mut buffer).unwrap();
    String::from_utf8(buffer.into_inner()).unwrap()
}
