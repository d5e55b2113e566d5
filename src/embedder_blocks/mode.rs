use crate::embedder_blocks::postprocess::{join_bicomps, orient_vertices};
use crate::embedder_blocks::structures::{EmbedGraph, NIL};
use crate::types::{EmbedMode, Outcome};
use crate::visibility;

/// Capability set the embed driver and walkdown dispatch through.
///
/// The planar behavior is the default for every operation; other modes
/// override selectively. This is the seam the outerplanarity and search
/// disciplines plug into without forking the engine.
pub trait ModeOps {
    fn mode(&self) -> EmbedMode;

    /// True when `w` still has a back-edge path to a proper ancestor of the
    /// step vertex: a small least ancestor, or a separated child whose
    /// subtree reaches one.
    fn externally_active(&self, g: &EmbedGraph, w: usize, i: usize) -> bool {
        if g.verts[w].least_ancestor < i {
            return true;
        }
        let c = g.verts[w].separated_child_head;
        c != NIL && g.verts[c].lowpoint < i
    }

    /// Largest edge count an embeddable graph on `n` vertices can have.
    fn edge_bound(&self, n: usize) -> usize {
        if n >= 3 { 3 * n - 6 } else { n.saturating_sub(1) }
    }

    /// Called when the walkdown sits on a vertex with nothing pertinent and
    /// no external activity: advance along the external face past it.
    fn handle_inactive_vertex(
        &self,
        g: &mut EmbedGraph,
        _i: usize,
        w: &mut usize,
        w_prev: &mut usize,
    ) -> Outcome {
        let (nw, np) = g.ext_face_step(*w, *w_prev);
        *w = nw;
        *w_prev = np;
        Outcome::Ok
    }

    /// Called when a pertinent child bicomp has stopping vertices on both
    /// sides. The root is left on the merge stack for obstruction
    /// isolation.
    fn handle_blocked_descendant(&self, g: &mut EmbedGraph, r: usize) -> Outcome {
        g.stack.push(r);
        g.stack.push(0);
        Outcome::Nonembeddable
    }

    /// Called when a step ends with unembedded forward arcs.
    fn handle_blocked_iteration(&self, _g: &mut EmbedGraph, _i: usize) -> Outcome {
        Outcome::Nonembeddable
    }

    /// Runs after the reverse-DFI loop. On success the embedding is
    /// finalized: one orientation per bicomp, then the residual bicomps are
    /// joined at their cut vertices. On a blockage the graph is left as the
    /// obstruction isolator expects it.
    fn embed_postprocess(&self, g: &mut EmbedGraph, result: Outcome) -> Outcome {
        if result == Outcome::Ok {
            let rc = orient_vertices(g);
            if rc != Outcome::Ok {
                return rc;
            }
            let rc = join_bicomps(g);
            if rc != Outcome::Ok {
                return rc;
            }
        }
        result
    }
}

/// Default discipline: spherical planarity.
pub struct PlanarOps;

impl ModeOps for PlanarOps {
    fn mode(&self) -> EmbedMode {
        EmbedMode::Planar
    }
}

/// Outerplanarity keeps every vertex on the outer face, which is the same
/// walk with every vertex treated as externally active, under the tighter
/// edge bound.
pub struct OuterplanarOps;

impl ModeOps for OuterplanarOps {
    fn mode(&self) -> EmbedMode {
        EmbedMode::Outerplanar
    }

    fn externally_active(&self, _g: &EmbedGraph, _w: usize, _i: usize) -> bool {
        true
    }

    fn edge_bound(&self, n: usize) -> usize {
        if n >= 2 { 2 * n - 3 } else { 0 }
    }
}

/// Planarity plus visibility span data derived once the embedding is
/// complete.
pub struct DrawPlanarOps;

impl ModeOps for DrawPlanarOps {
    fn mode(&self) -> EmbedMode {
        EmbedMode::DrawPlanar
    }

    fn embed_postprocess(&self, g: &mut EmbedGraph, result: Outcome) -> Outcome {
        if result == Outcome::Ok {
            let rc = orient_vertices(g);
            if rc != Outcome::Ok {
                return rc;
            }
            let rc = join_bicomps(g);
            if rc != Outcome::Ok {
                return rc;
            }
            g.visibility = Some(visibility::compute(g));
        }
        result
    }
}

static PLANAR_OPS: PlanarOps = PlanarOps;
static OUTERPLANAR_OPS: OuterplanarOps = OuterplanarOps;
static DRAW_PLANAR_OPS: DrawPlanarOps = DrawPlanarOps;

/// The capability set for a mode; search modes run on their base
/// discipline.
pub fn mode_ops(mode: EmbedMode) -> &'static dyn ModeOps {
    match mode.base() {
        EmbedMode::Outerplanar => &OUTERPLANAR_OPS,
        EmbedMode::DrawPlanar => &DRAW_PLANAR_OPS,
        _ => &PLANAR_OPS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_bounds() {
        let p = PlanarOps;
        assert_eq!(p.edge_bound(2), 1);
        assert_eq!(p.edge_bound(3), 3);
        assert_eq!(p.edge_bound(5), 9);
        let o = OuterplanarOps;
        assert_eq!(o.edge_bound(2), 1);
        assert_eq!(o.edge_bound(5), 7);
        assert_eq!(o.edge_bound(1), 0);
    }

    #[test]
    fn test_mode_dispatch() {
        assert_eq!(mode_ops(EmbedMode::Planar).mode(), EmbedMode::Planar);
        assert_eq!(mode_ops(EmbedMode::SearchK33).mode(), EmbedMode::Planar);
        assert_eq!(
            mode_ops(EmbedMode::SearchK23).mode(),
            EmbedMode::Outerplanar
        );
        assert_eq!(
            mode_ops(EmbedMode::DrawPlanar).mode(),
            EmbedMode::DrawPlanar
        );
    }
}
