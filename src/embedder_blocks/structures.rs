use petgraph::visit::EdgeRef;
use std::mem;

use crate::embedder_blocks::list_collection::ListCollection;
use crate::types::{DiGraph, EdgeLabel, Outcome, UnGraph};
use crate::visibility::VisibilityRep;

/// Nil sentinel for vertex ids, arc ids and list heads.
pub const NIL: usize = usize::MAX;

/// Role of a directed arc after depth-first preprocessing.
///
/// Tree-child and tree-parent always appear as a twin pair, and so do back
/// and forward.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArcType {
    Unknown,
    TreeChild,
    TreeParent,
    Back,
    Forward,
}

/// One vertex slot. Real vertices occupy `[0, n)`; slot `c + n` is the
/// virtual root copy standing for `parent(c)` in the bicomp whose root edge
/// is the tree edge into `c`.
#[derive(Clone, Debug)]
pub struct VertexRec {
    /// Original label, replaced by the DFI once records are sorted by DFI.
    pub index: usize,
    /// DFS parent (label before the DFI sort, DFI after), NIL for roots.
    pub parent: usize,
    /// Least DFI reachable over a single back edge from this vertex.
    pub least_ancestor: usize,
    pub lowpoint: usize,
    /// Step number of the last walkup that touched this vertex.
    pub visited_info: usize,
    /// Forward arc from the current step vertex down to here, or NIL.
    pub pertinent_arc: usize,
    /// Head of the circular forward-arc list (links live in the arcs).
    pub fwd_arc_list: usize,
    /// Head of the DFS child list in discovery (= DFI) order.
    pub sorted_child_head: usize,
    /// Head of the DFS child list sorted by lowpoint; children are removed
    /// as their bicomps merge in.
    pub separated_child_head: usize,
    /// Head of the pertinent child bicomp list for the current step.
    pub pertinent_bicomp_head: usize,
    pub first_arc: usize,
    pub last_arc: usize,
    /// The two external-face neighbors of this vertex.
    pub ext_face: [usize; 2],
    /// Set when a two-vertex bicomp leaves this vertex oriented against its
    /// root.
    pub ext_face_inverted: bool,
}

impl VertexRec {
    pub fn cleared(index: usize) -> Self {
        Self {
            index,
            parent: NIL,
            least_ancestor: NIL,
            lowpoint: NIL,
            visited_info: NIL,
            pertinent_arc: NIL,
            fwd_arc_list: NIL,
            sorted_child_head: NIL,
            separated_child_head: NIL,
            pertinent_bicomp_head: NIL,
            first_arc: NIL,
            last_arc: NIL,
            ext_face: [NIL, NIL],
            ext_face_inverted: false,
        }
    }
}

/// One directed arc slot. Arcs are allocated in twin pairs; the twin of arc
/// `j` is `j ^ 1`.
#[derive(Clone, Debug)]
pub struct ArcRec {
    pub neighbor: usize,
    pub next: usize,
    pub prev: usize,
    pub arc_type: ArcType,
    /// On a tree-child arc, records a pending bicomp flip.
    pub inverted: bool,
}

impl ArcRec {
    pub fn cleared() -> Self {
        Self {
            neighbor: NIL,
            next: NIL,
            prev: NIL,
            arc_type: ArcType::Unknown,
            inverted: false,
        }
    }
}

/// Flat-array graph store of the edge-addition embedder.
///
/// All storage is preallocated by [`EmbedGraph::init`]: `2n` vertex slots,
/// one arc pair per edge of capacity, the merge/DFS stack and four intrusive
/// list collections. Nothing is freed during an embedding; virtual vertices
/// are reclaimed in place when their bicomp merges.
#[derive(Clone, Debug)]
pub struct EmbedGraph {
    pub n: usize,
    pub m: usize,
    pub edge_capacity: usize,
    pub verts: Vec<VertexRec>,
    pub arcs: Vec<ArcRec>,
    pub sorted_children: ListCollection,
    pub separated_children: ListCollection,
    pub pertinent_bicomps: ListCollection,
    pub bin: ListCollection,
    pub buckets: Vec<usize>,
    /// Shared integer stack: DFS frames during preprocessing, merge pairs
    /// during the walkdown, the blocked bicomp root after a blockage.
    pub stack: Vec<usize>,
    pub sorted_by_dfi: bool,
    pub dfi_to_label: Vec<usize>,
    pub embedded: bool,
    /// Span data produced by the draw-planar mode.
    pub visibility: Option<VisibilityRep>,
}

/// Twin arc of `j`.
pub fn twin(j: usize) -> usize {
    j ^ 1
}

impl EmbedGraph {
    pub fn new() -> Self {
        Self {
            n: 0,
            m: 0,
            edge_capacity: 0,
            verts: Vec::new(),
            arcs: Vec::new(),
            sorted_children: ListCollection::new(0),
            separated_children: ListCollection::new(0),
            pertinent_bicomps: ListCollection::new(0),
            bin: ListCollection::new(0),
            buckets: Vec::new(),
            stack: Vec::new(),
            sorted_by_dfi: false,
            dfi_to_label: Vec::new(),
            embedded: false,
            visibility: None,
        }
    }

    /// Allocates storage for `n` vertices and the default edge capacity
    /// (the planar bound `3n - 6` plus slack, so dense witnesses like K5
    /// still fit).
    pub fn init(&mut self, n: usize) {
        self.n = n;
        self.m = 0;
        self.edge_capacity = 3 * n.max(1);
        self.verts = (0..2 * n)
            .map(|i| VertexRec::cleared(if i < n { i } else { NIL }))
            .collect();
        self.arcs = vec![ArcRec::cleared(); 2 * self.edge_capacity];
        self.sorted_children = ListCollection::new(n);
        self.separated_children = ListCollection::new(n);
        self.pertinent_bicomps = ListCollection::new(n);
        self.bin = ListCollection::new(n);
        self.buckets = vec![NIL; n];
        self.stack = Vec::with_capacity(4 * self.edge_capacity + 2 * n);
        self.sorted_by_dfi = false;
        self.dfi_to_label = Vec::new();
        self.embedded = false;
        self.visibility = None;
    }

    /// Resets all per-embedding state, dropping the edges as well. The
    /// vertex count and capacities are retained; nothing is reallocated.
    pub fn reinitialize(&mut self) {
        let n = self.n;
        for i in 0..2 * n {
            self.verts[i] = VertexRec::cleared(if i < n { i } else { NIL });
        }
        for arc in &mut self.arcs {
            *arc = ArcRec::cleared();
        }
        self.m = 0;
        self.sorted_children.clear();
        self.separated_children.clear();
        self.pertinent_bicomps.clear();
        self.bin.clear();
        self.buckets.fill(NIL);
        self.stack.clear();
        self.sorted_by_dfi = false;
        self.dfi_to_label.clear();
        self.embedded = false;
        self.visibility = None;
    }

    /// Grows the arc array (and the stack reserve) to hold `m` edges.
    /// Only meaningful before embedding starts.
    pub fn ensure_edge_capacity(&mut self, m: usize) {
        if m > self.edge_capacity {
            self.edge_capacity = m;
            self.arcs.resize(2 * m, ArcRec::cleared());
            let want = 4 * self.edge_capacity + 2 * self.n;
            if self.stack.capacity() < want {
                self.stack.reserve(want - self.stack.len());
            }
        }
    }

    /// Adds the undirected edge `(u, v)` as a twin arc pair, appending one
    /// arc to each endpoint's adjacency list. Preprocessing-time only.
    ///
    /// Self-loops, parallel edges, out-of-range endpoints and a full arc
    /// array are all reported as `Internal`.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Outcome {
        if self.embedded || u >= self.n || v >= self.n || u == v {
            return Outcome::Internal;
        }
        let mut j = self.verts[u].first_arc;
        while j != NIL {
            if self.arcs[j].neighbor == v {
                return Outcome::Internal;
            }
            j = self.arcs[j].next;
        }
        if self.m >= self.edge_capacity {
            return Outcome::Internal;
        }
        let a = 2 * self.m;
        let b = a + 1;
        self.arcs[a] = ArcRec {
            neighbor: v,
            ..ArcRec::cleared()
        };
        self.arcs[b] = ArcRec {
            neighbor: u,
            ..ArcRec::cleared()
        };
        self.push_arc_back(u, a);
        self.push_arc_back(v, b);
        self.m += 1;
        Outcome::Ok
    }

    /// Builds a store from a petgraph graph, ignoring self-loops and
    /// parallel edges the way the rest of the crate does.
    pub fn from_graph(graph: &UnGraph) -> Self {
        let mut g = EmbedGraph::new();
        g.init(graph.node_count());
        g.ensure_edge_capacity(graph.edge_count());
        for e in graph.edge_references() {
            let (u, v) = (e.source().index(), e.target().index());
            if u == v {
                continue;
            }
            // a duplicate is rejected by add_edge, which is the dedup here
            let _ = g.add_edge(u, v);
        }
        g
    }

    /// Current label of the vertex in slot `i`.
    pub fn label_of(&self, i: usize) -> usize {
        if self.sorted_by_dfi { self.dfi_to_label[i] } else { i }
    }

    /// Emits the adjacency lists as a directed petgraph graph, one arc per
    /// directed arc slot, in embedding order. Node weights carry the
    /// original labels; arcs are labeled by their DFS role (tree or back),
    /// or `Real` before preprocessing has typed them.
    pub fn to_graph(&self) -> DiGraph {
        let mut out = DiGraph::new();
        for i in 0..self.n {
            out.add_node(self.label_of(i) as u32);
        }
        for u in 0..self.n {
            let mut j = self.verts[u].first_arc;
            while j != NIL {
                let v = self.arcs[j].neighbor;
                if v < self.n {
                    let label = match self.arcs[j].arc_type {
                        ArcType::TreeChild | ArcType::TreeParent => EdgeLabel::Tree,
                        ArcType::Back | ArcType::Forward => EdgeLabel::Back,
                        ArcType::Unknown => EdgeLabel::Real,
                    };
                    out.add_edge(
                        petgraph::graph::NodeIndex::new(u),
                        petgraph::graph::NodeIndex::new(v),
                        label,
                    );
                }
                j = self.arcs[j].next;
            }
        }
        out
    }

    /// The `copyGraph` operation: this store becomes a copy of `other`.
    pub fn copy_from(&mut self, other: &EmbedGraph) {
        self.clone_from(other);
    }

    /// The `dupGraph` operation.
    pub fn dup(&self) -> EmbedGraph {
        self.clone()
    }

    /// Toggles the vertex records between input-label order and DFI order,
    /// remapping arc neighbors and parents accordingly. After sorting into
    /// DFI order, `verts[i].index == i`.
    pub fn sort_vertices(&mut self) {
        let n = self.n;
        if n == 0 {
            return;
        }
        if !self.sorted_by_dfi {
            // label order -> DFI order; the index fields hold the DFIs
            let mut dfi_of_label = vec![NIL; n];
            for label in 0..n {
                dfi_of_label[label] = self.verts[label].index;
            }
            for j in 0..2 * self.m {
                let nb = self.arcs[j].neighbor;
                if nb < n {
                    self.arcs[j].neighbor = dfi_of_label[nb];
                }
            }
            let mut new_real = vec![VertexRec::cleared(NIL); n];
            let mut dfi_to_label = vec![NIL; n];
            for label in 0..n {
                let mut rec = self.verts[label].clone();
                let d = dfi_of_label[label];
                if rec.parent != NIL {
                    rec.parent = dfi_of_label[rec.parent];
                }
                rec.index = d;
                dfi_to_label[d] = label;
                new_real[d] = rec;
            }
            for d in 0..n {
                self.verts[d] = new_real[d].clone();
            }
            self.dfi_to_label = dfi_to_label;
            self.sorted_by_dfi = true;
        } else {
            // DFI order -> label order; index fields keep holding the DFIs
            for j in 0..2 * self.m {
                let nb = self.arcs[j].neighbor;
                if nb < n {
                    self.arcs[j].neighbor = self.dfi_to_label[nb];
                }
            }
            let mut new_real = vec![VertexRec::cleared(NIL); n];
            for d in 0..n {
                let mut rec = self.verts[d].clone();
                if rec.parent != NIL {
                    rec.parent = self.dfi_to_label[rec.parent];
                }
                new_real[self.dfi_to_label[d]] = rec;
            }
            for label in 0..n {
                self.verts[label] = new_real[label].clone();
            }
            self.sorted_by_dfi = false;
        }
    }

    /// Inserts arc `j` at the front of `v`'s adjacency list.
    pub fn push_arc_front(&mut self, v: usize, j: usize) {
        let first = self.verts[v].first_arc;
        self.arcs[j].prev = NIL;
        self.arcs[j].next = first;
        if first == NIL {
            self.verts[v].last_arc = j;
        } else {
            self.arcs[first].prev = j;
        }
        self.verts[v].first_arc = j;
    }

    /// Inserts arc `j` at the back of `v`'s adjacency list.
    pub fn push_arc_back(&mut self, v: usize, j: usize) {
        let last = self.verts[v].last_arc;
        self.arcs[j].next = NIL;
        self.arcs[j].prev = last;
        if last == NIL {
            self.verts[v].first_arc = j;
        } else {
            self.arcs[last].next = j;
        }
        self.verts[v].last_arc = j;
    }

    /// Inserts arc `j` on the given side of `v`'s adjacency list: link 0 is
    /// the first-arc end, link 1 the last-arc end.
    pub fn insert_arc_at(&mut self, v: usize, link: usize, j: usize) {
        if link == 0 {
            self.push_arc_front(v, j);
        } else {
            self.push_arc_back(v, j);
        }
    }

    /// Unlinks arc `j` from `v`'s adjacency list.
    pub fn remove_arc_from_adjacency(&mut self, v: usize, j: usize) {
        let (p, nx) = (self.arcs[j].prev, self.arcs[j].next);
        if p == NIL {
            self.verts[v].first_arc = nx;
        } else {
            self.arcs[p].next = nx;
        }
        if nx == NIL {
            self.verts[v].last_arc = p;
        } else {
            self.arcs[nx].prev = p;
        }
        self.arcs[j].prev = NIL;
        self.arcs[j].next = NIL;
    }

    /// Appends arc `j` to `v`'s circular forward-arc list.
    pub fn fwd_list_append(&mut self, v: usize, j: usize) {
        let head = self.verts[v].fwd_arc_list;
        if head == NIL {
            self.arcs[j].next = j;
            self.arcs[j].prev = j;
            self.verts[v].fwd_arc_list = j;
        } else {
            let tail = self.arcs[head].prev;
            self.arcs[tail].next = j;
            self.arcs[j].prev = tail;
            self.arcs[j].next = head;
            self.arcs[head].prev = j;
        }
    }

    /// Unlinks arc `j` from `v`'s circular forward-arc list.
    pub fn fwd_list_remove(&mut self, v: usize, j: usize) {
        if self.arcs[j].next == j {
            self.verts[v].fwd_arc_list = NIL;
        } else {
            let (p, nx) = (self.arcs[j].prev, self.arcs[j].next);
            self.arcs[p].next = nx;
            self.arcs[nx].prev = p;
            if self.verts[v].fwd_arc_list == j {
                self.verts[v].fwd_arc_list = nx;
            }
        }
        self.arcs[j].prev = NIL;
        self.arcs[j].next = NIL;
    }

    /// One step along the external face from `v`, having entered `v` over
    /// link `prev_link`. Returns the next vertex and the link it was
    /// entered by, resolving the two-vertex bicomp ambiguity with the
    /// inversion flag.
    pub fn ext_face_step(&self, v: usize, prev_link: usize) -> (usize, usize) {
        let next = self.verts[v].ext_face[1 ^ prev_link];
        let nv = &self.verts[next];
        let next_prev = if nv.ext_face[0] == nv.ext_face[1] {
            prev_link ^ nv.ext_face_inverted as usize
        } else if nv.ext_face[0] == v {
            0
        } else {
            1
        };
        (next, next_prev)
    }

    /// Reverses the rotation of `v`: swaps the list ends, every arc's
    /// next/prev pair and the external-face links.
    pub fn invert_vertex(&mut self, v: usize) {
        let mut j = self.verts[v].first_arc;
        while j != NIL {
            let a = &mut self.arcs[j];
            mem::swap(&mut a.next, &mut a.prev);
            j = a.prev;
        }
        let vr = &mut self.verts[v];
        mem::swap(&mut vr.first_arc, &mut vr.last_arc);
        vr.ext_face.swap(0, 1);
    }

    /// Merges vertex `r`'s adjacency list into `z` on `z`'s `z_prev_link`
    /// side, retargeting the twins of `r`'s arcs so the rest of the graph
    /// points at `z`. `r`'s record is cleared for reuse.
    pub fn merge_vertex(&mut self, z: usize, z_prev_link: usize, r: usize) {
        let mut j = self.verts[r].first_arc;
        while j != NIL {
            self.arcs[twin(j)].neighbor = z;
            j = self.arcs[j].next;
        }
        if self.verts[z].first_arc == NIL {
            self.verts[z].first_arc = self.verts[r].first_arc;
            self.verts[z].last_arc = self.verts[r].last_arc;
        } else if z_prev_link == 0 {
            let e_w = self.verts[z].first_arc;
            let e_r = self.verts[r].last_arc;
            let e_ext = self.verts[r].first_arc;
            self.arcs[e_w].prev = e_r;
            self.arcs[e_r].next = e_w;
            self.verts[z].first_arc = e_ext;
        } else {
            let e_w = self.verts[z].last_arc;
            let e_r = self.verts[r].first_arc;
            let e_ext = self.verts[r].last_arc;
            self.arcs[e_w].next = e_r;
            self.arcs[e_r].prev = e_w;
            self.verts[z].last_arc = e_ext;
        }
        self.verts[r] = VertexRec::cleared(NIL);
    }

    /// Number of arcs currently in `v`'s adjacency list.
    pub fn degree(&self, v: usize) -> usize {
        let mut d = 0;
        let mut j = self.verts[v].first_arc;
        while j != NIL {
            d += 1;
            j = self.arcs[j].next;
        }
        d
    }
}

impl Default for EmbedGraph {
    fn default() -> Self {
        Self::new()
    }
}
