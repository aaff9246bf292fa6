//! Paged display-list collection for the Folio document renderer.
//!
//! Layout positions every box of a document in one continuous coordinate
//! space; printing needs discrete pages. This crate partitions a laid-out
//! box tree into per-page display lists — block items, inline items, and
//! collapsed-border table cells — while preserving stacking-layer
//! containment and overflow clipping.
//!
//! # Scope
//!
//! This crate implements:
//! - **Page lookup** ([§ 3 The Page Model](https://www.w3.org/TR/css-page-3/#page-model))
//!   - Offset-to-page-ordinal queries with a traversal-locality hint
//!   - Page-list invariant validation
//!
//! - **Box tree model** ([§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen))
//!   - Arena-allocated boxes with closed kind dispatch
//!   - Stacking layers as non-owning scope filters
//!     ([§ 9.9 Layered presentation](https://www.w3.org/TR/CSS2/visuren.html#layers))
//!
//! - **Paged collection** ([CSS Fragmentation Level 3](https://www.w3.org/TR/css-break-3/))
//!   - Layer-scoped recursive walk, inline and block dispatch
//!   - Cross-page duplication for boxes straddling page boundaries
//!   - Balanced clip push/restore markers per page
//!     ([§ 11.1.1 Overflow](https://www.w3.org/TR/CSS2/visufx.html#overflow))
//!   - Collapsed-border cell tracking
//!     ([§ 17.6.2](https://www.w3.org/TR/CSS2/tables.html#collapsing-borders))
//!     and repeating table header/footer notification
//!
//! # Not Implemented Here
//!
//! - Layout itself: box geometry, font metrics, and the CSS cascade are
//!   the layout engine's business; this crate reads what it produced
//! - Page construction: page sizes, margins, and print clip regions arrive
//!   finalized
//! - Painting: the per-page sequences are handed to a paint backend, which
//!   honors the clip markers as a strict stack per page
//! - Layer compositing: the walk refuses to cross a layer boundary; how
//!   layers stack against each other is the consumer's business

/// Render-pass context and capability flags.
pub mod context;
/// Contract-breach errors for the collection pass.
pub mod error;
/// Document-space rectangles and clip regions.
pub mod geometry;
/// Page geometry and offset-to-page lookup per [CSS Paged Media Level 3](https://www.w3.org/TR/css-page-3/).
pub mod page;
/// Display lists and the paged collector per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// The laid-out box tree and its stacking layers.
pub mod tree;

// Re-exports for convenience
pub use context::{CollectionMode, RenderContext};
pub use error::CollectError;
pub use geometry::{ClipShape, Rect};
pub use page::{PageBox, PageFinder, find_end_page, find_start_page, validate_page_list};
pub use paint::{
    DisplayListItem, PageResult, PagedBoxCollector, intersects_aggregate_bounds, intersects_any,
};
pub use tree::{
    BlockData, BoxId, BoxKind, BoxNode, BoxTree, InlineData, Layer, LayerId, OverflowClip,
    PaintInfo, TableCellData, TableData,
};
