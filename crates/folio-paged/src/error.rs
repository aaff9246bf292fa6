//! Contract-breach errors for the collection pass.
//!
//! Out-of-range vertical offsets are a normal outcome (`None` from the page
//! finder), never an error. The variants here are invariant violations from
//! an upstream collaborator: carrying on would emit unbalanced clip markers
//! and corrupt the paint state of every subsequent page, so the pass aborts
//! instead.

use thiserror::Error;

use crate::tree::BoxId;

/// A fatal contract breach detected while validating inputs or walking the
/// box tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectError {
    /// The page list contained no pages.
    #[error("page list is empty")]
    EmptyPageList,

    /// The page at `index` is not ordered after its predecessor, or its
    /// exclusive bottom does not lie below its top.
    #[error("page list is not sorted by ascending top at index {index}")]
    UnsortedPageList {
        /// Index of the offending page.
        index: usize,
    },

    /// The page at `index` overlaps the page before it.
    #[error("page {index} overlaps the previous page")]
    OverlappingPages {
        /// Index of the offending page.
        index: usize,
    },

    /// A box's end-of-range page lookup preceded its start-of-range lookup:
    /// its aggregate bounds are corrupt (negative height).
    #[error("box {box_id:?} maps to an inverted page range")]
    InvertedPageRange {
        /// The box whose bounds produced the inverted range.
        box_id: BoxId,
    },
}
