//! Display-list items and per-page accumulators.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Each page receives flat, append-only sequences in painting order (back
//! to front). The consumer iterates a page's sequences and executes each
//! item; it never needs to re-derive ordering from geometry.

use serde::Serialize;

use crate::geometry::ClipShape;
use crate::tree::BoxId;

/// A single entry in a page's display list.
///
/// Clip markers must nest correctly within each page sequence: every
/// `PushClip` is eventually matched by exactly one `SetClip` for the same
/// subtree, on every page the subtree touched.
///
/// [§ 11.1.1 Overflow](https://www.w3.org/TR/CSS2/visufx.html#overflow)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DisplayListItem {
    /// Paint a box. The consumer resolves the id against the box tree the
    /// collector walked.
    Box(BoxId),

    /// Narrow the active clip region before a clipped subtree's items.
    PushClip(ClipShape),

    /// Restore the clip region after a clipped subtree's items. Carries
    /// the region to restore to — the parent clip, or the page's own
    /// print clip when the subtree's clip was outermost.
    SetClip(ClipShape),
}

/// The collected output for one page: three ordered sequences, mutated
/// only by appending during collection passes.
///
/// The caller runs the collector once per layer against the same
/// accumulators, so results across layers interleave by call order, not by
/// geometry; paint order is preserved within each layer's own
/// contribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageResult {
    /// Block-level paint items, with their clip markers.
    ///
    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    /// Step 4: "the in-flow, non-inline-level, non-positioned descendants"
    pub blocks: Vec<DisplayListItem>,

    /// Inline-level paint items, with their clip markers.
    ///
    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    /// Step 5: "the in-flow, inline-level, non-positioned descendants"
    pub inlines: Vec<DisplayListItem>,

    /// Table cells whose borders collapse, tracked per page for the
    /// deferred border-painting pass.
    ///
    /// [§ 17.6.2 The collapsing border model](https://www.w3.org/TR/CSS2/tables.html#collapsing-borders)
    pub table_cells: Vec<BoxId>,
}

impl PageResult {
    /// Create an empty page result.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            blocks: Vec::new(),
            inlines: Vec::new(),
            table_cells: Vec::new(),
        }
    }

    /// Whether nothing was collected onto this page.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.inlines.is_empty() && self.table_cells.is_empty()
    }
}
