//! Arena-based box tree produced by layout and consumed by collection.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! The collector never mutates the tree; it reads geometry, kind flags, and
//! layer links, and emits [`BoxId`]s into per-page display lists. Everything
//! here is data the external layout stage has already computed — this crate
//! performs no layout of its own.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::layer::{Layer, LayerId};
use crate::geometry::{ClipShape, Rect};

/// A type-safe index into the box tree.
///
/// `BoxId` provides O(1) access to any box in the tree without borrowing
/// issues, and doubles as the payload of display-list items: the paint
/// backend resolves ids against the same tree the collector walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxId(pub usize);

/// Aggregate paint bounds of a box.
///
/// [§ 3 Fragmentation Model](https://www.w3.org/TR/css-break-3/#fragmentation-model)
///
/// The bounding rectangle enclosing a box and the visual effects of all its
/// descendants, in document space. Page membership and culling are decided
/// against this rectangle, never against exact shapes. A box the layout
/// stage produced no paint bounds for cannot be placed on any page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintInfo {
    /// Minimum bounding rectangle of the box and all descendant paint effects.
    pub aggregate_bounds: Rect,
}

/// Overflow clip data for a box that clips its children when painted.
///
/// [§ 11.1.1 Overflow](https://www.w3.org/TR/CSS2/visufx.html#overflow)
///
/// "UAs must clip the content of the element to the element's padding
/// edge" — the edge is computed by layout and recorded here; the collector
/// only turns it into push/restore markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverflowClip {
    /// The content clipping edge (normally the padding box).
    pub edge: Rect,
    /// Corner radius of the clip, from `border-radius`; 0 = rectangular.
    ///
    /// [§ 5 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
    pub radius: f32,
}

impl OverflowClip {
    /// The clip region this box pushes around its children.
    #[must_use]
    pub const fn shape(&self) -> ClipShape {
        if self.radius > 0.0 {
            ClipShape::RoundedRect {
                rect: self.edge,
                radius: self.radius,
            }
        } else {
            ClipShape::Rect(self.edge)
        }
    }
}

/// Kind-specific data for a generic block container box.
///
/// [§ 9.2.1 Block-level elements and block boxes](https://www.w3.org/TR/CSS2/visuren.html#block-boxes)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockData {
    /// True for a block-level box participating in inline flow
    /// (e.g. `inline-block`): its own aggregate bounds may be looser than
    /// its visible descendants, so inline collection runs a subtree
    /// intersection test before admitting it to a page.
    ///
    /// [§ 9.2.2 Inline-level elements](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    pub inline_level: bool,
}

/// Kind-specific data for a table box.
///
/// [§ 17.2 The CSS table model](https://www.w3.org/TR/CSS2/tables.html#table-display)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    /// True for an `inline-table`; treated like an inline-level block
    /// during inline collection.
    pub inline_level: bool,

    /// True when the table has a repeating header or footer row group.
    ///
    /// [§ 17.2](https://www.w3.org/TR/CSS2/tables.html#table-display)
    ///
    /// "If the table is split over multiple pages, user agents may repeat
    /// header rows on each page spanned by a table." Repositioning the
    /// repeated rows is the table machinery's job; the collector only
    /// notifies it once per render pass.
    pub repeating_sections: bool,
}

/// Kind-specific data for a table cell box.
///
/// [§ 17.6.2 The collapsing border model](https://www.w3.org/TR/CSS2/tables.html#collapsing-borders)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCellData {
    /// True when the cell's border is painted under the collapsing border
    /// model: "borders are centered on the grid lines between the cells",
    /// so the cell must be tracked separately on every page it appears on
    /// for the deferred border pass.
    pub collapsed_border: bool,
}

/// Kind-specific data for an inline content box.
///
/// [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineData {
    /// The flat list of elements with content under this box — its own
    /// children plus nested inline fragments, pre-flattened by the layout
    /// stage. Consulted only when this box masters an inline layer.
    pub elements_with_content: Vec<BoxId>,
}

/// The closed set of box variants the collector distinguishes.
///
/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// Dispatch is by `match`; there is no open inheritance. The shared fields
/// live on [`BoxNode`], the per-kind extras here.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum BoxKind {
    /// A generic block container box.
    Block(BlockData),
    /// A table box. Block-level for every purpose except its repeating
    /// header/footer notification.
    Table(TableData),
    /// A table cell box.
    TableCell(TableCellData),
    /// A line box. Never clipped or layered itself; its inline children
    /// are flattened onto every page the line touches.
    ///
    /// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    Line,
    /// An inline content box (a non-replaced inline and its fragments).
    InlineContent(InlineData),
}

/// A node in the laid-out box tree.
///
/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
#[derive(Debug, Clone, PartialEq)]
pub struct BoxNode {
    /// Which variant this box is, with kind-specific data.
    pub kind: BoxKind,

    /// The box's own border-box rectangle in document space. Used for
    /// exact-shape intersection tests on line and inline content boxes.
    pub border_rect: Rect,

    /// Aggregate paint bounds of this box and all its descendants, or
    /// `None` when layout produced no paint data for it.
    pub paint_info: Option<PaintInfo>,

    /// Children in paint order.
    pub children: Vec<BoxId>,

    /// The layer this box is the master of, if any. Set only at layer
    /// roots.
    pub layer: Option<LayerId>,

    /// The layer responsible for painting this box. A non-owning
    /// back-reference into the tree's layer table; the collector visits a
    /// box only when collecting exactly this layer.
    pub containing_layer: LayerId,

    /// Overflow clip data when this box clips its children on paint
    /// (`overflow` other than `visible`), `None` otherwise.
    pub overflow_clip: Option<OverflowClip>,
}

impl BoxNode {
    /// Create a box of the given kind, painted by `containing_layer`,
    /// with geometry left at the defaults.
    #[must_use]
    pub const fn new(kind: BoxKind, containing_layer: LayerId) -> Self {
        Self {
            kind,
            border_rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            paint_info: None,
            children: Vec::new(),
            layer: None,
            containing_layer,
            overflow_clip: None,
        }
    }

    /// Whether this box is block-level for collection purposes: a generic
    /// block, a table, or a table cell. Line boxes and inline content are
    /// not.
    #[must_use]
    pub fn is_block_box(&self) -> bool {
        matches!(
            self.kind,
            BoxKind::Block(_) | BoxKind::Table(_) | BoxKind::TableCell(_)
        )
    }

    /// Whether this block-level box participates in inline flow
    /// (`inline-block`, `inline-table`).
    #[must_use]
    pub fn is_inline_level(&self) -> bool {
        match &self.kind {
            BoxKind::Block(data) => data.inline_level,
            BoxKind::Table(data) => data.inline_level,
            BoxKind::TableCell(_) | BoxKind::Line | BoxKind::InlineContent(_) => false,
        }
    }

    /// The aggregate paint bounds, if layout produced any.
    #[must_use]
    pub fn aggregate_bounds(&self) -> Option<Rect> {
        self.paint_info.as_ref().map(|info| info.aggregate_bounds)
    }
}

/// The box tree: an arena of [`BoxNode`]s plus the layer table.
///
/// Built by the external layout stage, read-only during collection. All
/// relationships are [`BoxId`]/[`LayerId`] indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxTree {
    boxes: Vec<BoxNode>,
    layers: Vec<Layer>,
}

impl BoxTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            boxes: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Allocate a new box of the given kind painted by `containing_layer`
    /// and return its id. Geometry and flags are filled in afterwards via
    /// [`BoxTree::node_mut`].
    pub fn alloc(&mut self, kind: BoxKind, containing_layer: LayerId) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(BoxNode::new(kind, containing_layer));
        id
    }

    /// Allocate a new layer and return its id.
    pub fn alloc_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.layers.len());
        self.layers.push(layer);
        id
    }

    /// Get a box by id.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&BoxNode> {
        self.boxes.get(id.0)
    }

    /// Get a box by id for mutation (used while layout builds the tree).
    #[must_use]
    pub fn node_mut(&mut self, id: BoxId) -> Option<&mut BoxNode> {
        self.boxes.get_mut(id.0)
    }

    /// Get a layer by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated from this tree; layer ids are
    /// produced only by [`BoxTree::alloc_layer`], so a stray id is a
    /// caller-side bug, not an input condition.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }

    /// All layers, in allocation order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Append `child` to `parent`'s child list (paint order).
    pub fn append_child(&mut self, parent: BoxId, child: BoxId) {
        if let Some(node) = self.boxes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    /// The children of a box, in paint order.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.boxes.get(id.0).map_or(&[], |node| &node.children)
    }

    /// Number of boxes in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the tree contains no boxes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
