//! The laid-out box tree and its stacking layers.
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//! [CSS Fragmentation Module Level 3](https://www.w3.org/TR/css-break-3/)
//!
//! The tree is produced by an external layout stage and consumed read-only
//! by the paged collector. It uses arena allocation with [`BoxId`] indices
//! for all relationships, providing O(1) access and traversal without
//! borrow checker issues.
//!
//! # Module Structure
//!
//! - [`box_tree`] - Arena, box nodes, box kinds, and paint bounds
//! - [`layer`] - Stacking layers and the non-owning layer references

pub mod box_tree;
pub mod layer;

// Re-exports for convenience
pub use box_tree::{
    BlockData, BoxId, BoxKind, BoxNode, BoxTree, InlineData, OverflowClip, PaintInfo, TableCellData,
    TableData,
};
pub use layer::{Layer, LayerId};
