use crate::embedder_blocks::structures::{EmbedGraph, NIL};

/// Records the pertinence of the forward arc `j` from the step vertex `i`
/// down to its descendant endpoint.
///
/// Two external-face walkers, zig and zag, start at the descendant and
/// advance in opposite directions. Whichever reaches the bicomp's root copy
/// first identifies the root edge; the root's DFS child is recorded in the
/// parent copy's pertinent bicomp list and both walkers jump to the parent
/// copy. A walker that lands on a vertex already visited in this step stops
/// the climb: the path above it was recorded by an earlier walkup, and this
/// early out is what keeps the total step work linear.
///
/// Internally active child bicomps are prepended, externally active ones
/// appended, so the walkdown drains the internal ones first.
pub fn walk_up(g: &mut EmbedGraph, i: usize, j: usize) {
    let n = g.n;
    let w = g.arcs[j].neighbor;
    g.verts[w].pertinent_arc = j;

    let (mut zig, mut zig_prev) = (w, 1usize);
    let (mut zag, mut zag_prev) = (w, 0usize);

    while zig != i {
        if g.verts[zig].visited_info == i || g.verts[zag].visited_info == i {
            break;
        }
        g.verts[zig].visited_info = i;
        g.verts[zag].visited_info = i;

        let root = if zig >= n {
            zig
        } else if zag >= n {
            zag
        } else {
            NIL
        };

        if root != NIL {
            let child = root - n;
            let parent = g.verts[child].parent;
            if g.verts[child].lowpoint >= i {
                g.verts[parent].pertinent_bicomp_head = g
                    .pertinent_bicomps
                    .prepend(g.verts[parent].pertinent_bicomp_head, child);
            } else {
                g.verts[parent].pertinent_bicomp_head = g
                    .pertinent_bicomps
                    .append(g.verts[parent].pertinent_bicomp_head, child);
            }
            zig = parent;
            zig_prev = 1;
            zag = parent;
            zag_prev = 0;
        } else {
            let (v, p) = g.ext_face_step(zig, zig_prev);
            zig = v;
            zig_prev = p;
            let (v, p) = g.ext_face_step(zag, zag_prev);
            zag = v;
            zag_prev = p;
        }
    }
}
