//! Clip intersection predicates used by the collection walk.
//!
//! Both predicates drive page-membership and culling decisions, not
//! pixel-exact visibility: they answer "could anything of this box land
//! inside this clip region", erring on the side of inclusion.

use crate::geometry::ClipShape;
use crate::tree::{BoxId, BoxKind, BoxNode, BoxTree};

/// Whether `clip` intersects the box's aggregate paint bounds.
///
/// An absent clip constrains nothing and intersects everything. A box
/// without paint bounds has no known extent, so nothing can be proven to
/// intersect it — it is culled.
#[must_use]
pub fn intersects_aggregate_bounds(clip: Option<&ClipShape>, node: &BoxNode) -> bool {
    let Some(clip) = clip else {
        return true;
    };

    let Some(info) = &node.paint_info else {
        return false;
    };

    clip.intersects_rect(&info.aggregate_bounds)
}

/// Whether `container` or any of its non-layer-crossing descendants
/// intersects `clip`.
///
/// Used for block-level boxes participating in inline flow, whose own
/// aggregate bounds may be looser than their actual visible descendants.
/// Line boxes are tested by their exact rectangle and never recursed into
/// (their inline children are covered by the line's own bounds). Recursion
/// stops at nested layers unless `container` is `master`, the root of the
/// scope being searched: a different layer's walk is responsible for that
/// subtree.
///
/// Short-circuits on the first intersecting descendant.
#[must_use]
pub fn intersects_any(tree: &BoxTree, clip: &ClipShape, master: BoxId, container: BoxId) -> bool {
    let Some(node) = tree.get(container) else {
        return false;
    };

    if matches!(node.kind, BoxKind::Line) {
        return clip.intersects_rect(&node.border_rect);
    }

    if (node.layer.is_none() || !node.is_block_box()) && clip.intersects_rect(&node.border_rect) {
        return true;
    }

    if node.layer.is_none() || container == master {
        for &child in &node.children {
            if intersects_any(tree, clip, master, child) {
                return true;
            }
        }
    }

    false
}
