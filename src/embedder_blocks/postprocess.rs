use crate::embedder_blocks::structures::{ArcType, EmbedGraph, NIL};
use crate::types::Outcome;

/// Imposes one consistent rotation per bicomp.
///
/// Every bicomp still rooted at a virtual vertex is traversed along its
/// tree-child arcs; the signs accumulated on those arcs during merges say
/// which vertices ended up mirror-imaged relative to the bicomp root, and
/// those get re-inverted here.
pub fn orient_vertices(g: &mut EmbedGraph) -> Outcome {
    for root in g.n..2 * g.n {
        if g.verts[root].first_arc != NIL {
            orient_vertices_in_bicomp(g, root, false);
        }
    }
    Outcome::Ok
}

/// Orientation pass over one bicomp. With `preserve_signs` the tree-arc
/// signs survive the traversal, which extension passes over an already
/// finished embedding need.
pub fn orient_vertices_in_bicomp(g: &mut EmbedGraph, root: usize, preserve_signs: bool) {
    g.stack.clear();
    g.stack.push(root);
    g.stack.push(0);
    while !g.stack.is_empty() {
        let invert = g.stack.pop().expect("Orient frames are pushed in pairs") != 0;
        let v = g.stack.pop().expect("Orient frames are pushed in pairs");
        if invert {
            g.invert_vertex(v);
        }
        let mut j = g.verts[v].first_arc;
        while j != NIL {
            if g.arcs[j].arc_type == ArcType::TreeChild {
                let child_invert = invert ^ g.arcs[j].inverted;
                if !preserve_signs {
                    g.arcs[j].inverted = false;
                }
                g.stack.push(g.arcs[j].neighbor);
                g.stack.push(child_invert as usize);
            }
            j = g.arcs[j].next;
        }
    }
}

/// Joins the bicomps that never merged during the walkdowns: each residual
/// virtual root's adjacency is folded into the real parent vertex, giving
/// one combinatorial embedding per connected component. No edges are added.
pub fn join_bicomps(g: &mut EmbedGraph) -> Outcome {
    for root in g.n..2 * g.n {
        if g.verts[root].first_arc == NIL {
            continue;
        }
        let child = root - g.n;
        let parent = g.verts[child].parent;
        g.verts[parent].separated_child_head = g
            .separated_children
            .remove(g.verts[parent].separated_child_head, child);
        g.merge_vertex(parent, 0, root);
    }
    Outcome::Ok
}
