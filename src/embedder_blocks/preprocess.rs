use fixedbitset::FixedBitSet;

use crate::embedder_blocks::structures::{ArcType, EmbedGraph, NIL, twin};
use crate::types::Outcome;

/// Runs the whole preprocessing pipeline: depth-first search, the DFI sort,
/// lowpoints, the separated child lists and the singleton-bicomp DFS-tree
/// embedding. Leaves the graph ready for the reverse-DFI embed loop.
pub fn embed_prepare(g: &mut EmbedGraph) -> Outcome {
    if g.stack.capacity() < 2 * g.arcs.len() {
        return Outcome::Internal;
    }
    create_dfs_tree(g);
    g.sort_vertices();
    compute_lowpoints(g);
    build_separated_child_lists(g);
    create_dfs_tree_embedding(g);
    Outcome::Ok
}

/// Single iterative DFS over all components.
///
/// Assigns DFIs and parents, types every arc (tree-child/tree-parent or
/// back/forward), moves forward arcs into the ancestor's forward-arc list,
/// seeds one virtual root-copy slot per tree edge and tracks the least
/// ancestor reachable over one back edge.
fn create_dfs_tree(g: &mut EmbedGraph) {
    let n = g.n;
    let mut visited = FixedBitSet::with_capacity(n);
    let mut next_dfi = 0;

    for start in 0..n {
        if visited.contains(start) {
            continue;
        }
        g.stack.clear();
        g.stack.push(NIL);
        g.stack.push(NIL);
        while let Some(e) = g.stack.pop() {
            let u_parent = g.stack.pop().expect("Frames are pushed in pairs");
            let u = if e == NIL { start } else { g.arcs[e].neighbor };
            if visited.contains(u) {
                continue;
            }
            visited.insert(u);
            let u_dfi = next_dfi;
            next_dfi += 1;
            g.verts[u].index = u_dfi;
            g.verts[u].parent = u_parent;
            g.verts[u].least_ancestor = u_dfi;
            g.verts[u].visited_info = n;
            if e != NIL {
                g.arcs[e].arc_type = ArcType::TreeChild;
                g.arcs[twin(e)].arc_type = ArcType::TreeParent;
                g.verts[u_parent].sorted_child_head =
                    g.sorted_children.append(g.verts[u_parent].sorted_child_head, u_dfi);
                // the root copy for this tree edge lives at dfi + n
                g.verts[u_dfi + n].first_arc = e;
                g.verts[u_dfi + n].last_arc = e;
            }
            let mut j = g.verts[u].first_arc;
            while j != NIL {
                let next_j = g.arcs[j].next;
                if g.arcs[j].arc_type != ArcType::TreeParent {
                    let w = g.arcs[j].neighbor;
                    if !visited.contains(w) {
                        g.stack.push(u);
                        g.stack.push(j);
                    } else {
                        // w is a proper ancestor of u
                        g.arcs[j].arc_type = ArcType::Back;
                        let f = twin(j);
                        g.arcs[f].arc_type = ArcType::Forward;
                        g.remove_arc_from_adjacency(w, f);
                        g.fwd_list_append(w, f);
                        let w_dfi = g.verts[w].index;
                        if w_dfi < g.verts[u].least_ancestor {
                            g.verts[u].least_ancestor = w_dfi;
                        }
                    }
                }
                j = next_j;
            }
        }
    }
}

/// Descending-DFI sweep; children always come before their parents, so one
/// pass suffices.
fn compute_lowpoints(g: &mut EmbedGraph) {
    for i in (0..g.n).rev() {
        let mut lp = g.verts[i].least_ancestor;
        let head = g.verts[i].sorted_child_head;
        let mut c = head;
        while c != NIL {
            lp = lp.min(g.verts[c].lowpoint);
            c = g.sorted_children.successor(head, c);
        }
        g.verts[i].lowpoint = lp;
    }
}

/// Bucket sort of DFS children by lowpoint; the separated child lists come
/// out in ascending lowpoint order, which the activity tests rely on.
fn build_separated_child_lists(g: &mut EmbedGraph) {
    g.bin.clear();
    g.buckets.fill(NIL);
    for c in 0..g.n {
        if g.verts[c].parent != NIL {
            let lp = g.verts[c].lowpoint;
            g.buckets[lp] = g.bin.append(g.buckets[lp], c);
        }
    }
    for lp in 0..g.n {
        let head = g.buckets[lp];
        let mut c = head;
        while c != NIL {
            let p = g.verts[c].parent;
            g.verts[p].separated_child_head =
                g.separated_children.append(g.verts[p].separated_child_head, c);
            c = g.bin.successor(head, c);
        }
    }
}

/// Rebuilds every adjacency list into the singleton-bicomp form: each tree
/// edge becomes the sole edge of the bicomp rooted at the child's root
/// copy, with the external-face links of both ends closing the two-vertex
/// cycle. Back arcs leave the lists; they return one at a time during the
/// walkdown.
fn create_dfs_tree_embedding(g: &mut EmbedGraph) {
    let n = g.n;
    for v in 0..n {
        if g.verts[v].parent == NIL {
            g.verts[v].first_arc = NIL;
            g.verts[v].last_arc = NIL;
            continue;
        }
        let r = v + n;
        let child_arc = g.verts[r].first_arc;
        let parent_arc = twin(child_arc);
        g.verts[v].first_arc = parent_arc;
        g.verts[v].last_arc = parent_arc;
        g.arcs[parent_arc].next = NIL;
        g.arcs[parent_arc].prev = NIL;
        g.arcs[parent_arc].neighbor = r;
        g.arcs[child_arc].next = NIL;
        g.arcs[child_arc].prev = NIL;
        g.arcs[child_arc].neighbor = v;
        g.verts[v].ext_face = [r, r];
        g.verts[r].ext_face = [v, v];
    }
}
