use crate::embedder_blocks::mode::ModeOps;
use crate::embedder_blocks::structures::{ArcType, EmbedGraph, NIL, twin};
use crate::types::Outcome;

/// True when `w` still has an unembedded back edge to the step vertex or a
/// pertinent child bicomp.
pub fn pertinent(g: &EmbedGraph, w: usize) -> bool {
    g.verts[w].pertinent_arc != NIL || g.verts[w].pertinent_bicomp_head != NIL
}

fn internally_active(g: &EmbedGraph, ops: &dyn ModeOps, w: usize, i: usize) -> bool {
    pertinent(g, w) && !ops.externally_active(g, w, i)
}

fn inactive(g: &EmbedGraph, ops: &dyn ModeOps, w: usize, i: usize) -> bool {
    !pertinent(g, w) && !ops.externally_active(g, w, i)
}

/// Walks both external-face sides of the bicomp rooted at the virtual
/// vertex `root`, embedding every back edge from the step vertex `i` whose
/// pertinence the walkup recorded, and merging pertinent child bicomps on
/// the way down.
///
/// A stopping vertex (externally active, nothing pertinent) ends a side; a
/// child bicomp with stopping vertices on both sides is a blockage and is
/// handed to the mode's blocked-descendant handler with the merge stack
/// intact.
pub fn walk_down(g: &mut EmbedGraph, ops: &dyn ModeOps, i: usize, root: usize) -> Outcome {
    g.stack.clear();
    for side in 0..2usize {
        let (mut w, mut w_prev) = g.ext_face_step(root, 1 ^ side);
        while w != root {
            if g.verts[w].pertinent_arc != NIL {
                if !g.stack.is_empty() {
                    let rc = merge_bicomps(g);
                    if rc != Outcome::Ok {
                        return rc;
                    }
                }
                embed_back_edge(g, i, side, root, w, w_prev);
                g.verts[w].pertinent_arc = NIL;
            }
            if g.verts[w].pertinent_bicomp_head != NIL {
                g.stack.push(w);
                g.stack.push(w_prev);
                let child = g.verts[w].pertinent_bicomp_head;
                let r = child + g.n;
                let (x, x_prev) = g.ext_face_step(r, 1);
                let (y, y_prev) = g.ext_face_step(r, 0);
                let rout;
                if internally_active(g, ops, x, i) {
                    w = x;
                    w_prev = x_prev;
                    rout = 0;
                } else if internally_active(g, ops, y, i) {
                    w = y;
                    w_prev = y_prev;
                    rout = 1;
                } else if pertinent(g, x) {
                    w = x;
                    w_prev = x_prev;
                    rout = 0;
                } else if pertinent(g, y) {
                    w = y;
                    w_prev = y_prev;
                    rout = 1;
                } else {
                    return ops.handle_blocked_descendant(g, r);
                }
                g.stack.push(r);
                g.stack.push(rout);
            } else if inactive(g, ops, w, i) {
                let rc = ops.handle_inactive_vertex(g, i, &mut w, &mut w_prev);
                if rc != Outcome::Ok {
                    return rc;
                }
            } else {
                // stopping vertex
                break;
            }
        }
        if w != root {
            debug_assert!(g.stack.is_empty());
            g.verts[root].ext_face[side] = w;
            g.verts[w].ext_face[w_prev] = root;
            let two = g.verts[w].ext_face[0] == g.verts[w].ext_face[1];
            g.verts[w].ext_face_inverted = two && w_prev == side;
        }
    }
    Outcome::Ok
}

/// Embeds the pertinent back edge from the bicomp root down to `w`: the
/// forward arc leaves the step vertex's forward-arc list for the root's
/// adjacency on the active side, its twin joins `w`'s adjacency on the
/// entry side, and the external face short-circuits from the root straight
/// to `w`.
pub fn embed_back_edge(
    g: &mut EmbedGraph,
    i: usize,
    side: usize,
    root: usize,
    w: usize,
    w_prev: usize,
) {
    let j = g.verts[w].pertinent_arc;
    g.fwd_list_remove(i, j);
    g.insert_arc_at(root, side, j);
    let b = twin(j);
    g.arcs[b].neighbor = root;
    g.insert_arc_at(w, w_prev, b);
    g.verts[root].ext_face[side] = w;
    g.verts[w].ext_face[w_prev] = root;
}

/// Drains the merge stack, joining each recorded child bicomp root into its
/// cut vertex. A bicomp entered and left on the same side gets flipped, and
/// the flip is remembered as a sign on its tree-child arc so the
/// post-processing can impose one orientation per bicomp.
pub fn merge_bicomps(g: &mut EmbedGraph) -> Outcome {
    while !g.stack.is_empty() {
        let rout = g.stack.pop().expect("Merge entries are pushed in pairs");
        let r = g.stack.pop().expect("Merge entries are pushed in pairs");
        let z_prev = g.stack.pop().expect("Merge entries are pushed in pairs");
        let z = g.stack.pop().expect("Merge entries are pushed in pairs");
        if r < g.n || r >= 2 * g.n {
            return Outcome::Internal;
        }

        // stitch the external face across the cut vertex
        let ext_v = g.verts[r].ext_face[1 ^ rout];
        g.verts[z].ext_face[z_prev] = ext_v;
        if g.verts[ext_v].ext_face[0] == g.verts[ext_v].ext_face[1] {
            let link = rout ^ g.verts[ext_v].ext_face_inverted as usize;
            g.verts[ext_v].ext_face[link] = z;
        } else {
            let link = if g.verts[ext_v].ext_face[0] == r { 0 } else { 1 };
            g.verts[ext_v].ext_face[link] = z;
        }

        // same inbound and outbound side means the child bicomp is flipped
        if z_prev == rout {
            if g.verts[r].first_arc != g.verts[r].last_arc {
                g.invert_vertex(r);
            }
            let mut j = g.verts[r].first_arc;
            while j != NIL {
                if g.arcs[j].arc_type == ArcType::TreeChild {
                    g.arcs[j].inverted = !g.arcs[j].inverted;
                    break;
                }
                j = g.arcs[j].next;
            }
        }

        let child = r - g.n;
        g.verts[z].pertinent_bicomp_head = g
            .pertinent_bicomps
            .remove(g.verts[z].pertinent_bicomp_head, child);
        g.verts[z].separated_child_head = g
            .separated_children
            .remove(g.verts[z].separated_child_head, child);

        g.merge_vertex(z, z_prev, r);
    }
    Outcome::Ok
}
