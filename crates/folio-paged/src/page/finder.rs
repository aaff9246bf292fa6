//! Offset-to-page-ordinal lookup.
//!
//! [§ 3 The Page Model](https://www.w3.org/TR/css-page-3/#page-model)
//!
//! A depth-first walk of a laid-out box tree produces highly repetitive,
//! mostly monotonically increasing Y queries, and most of the content
//! being collected sits near the end of the document. The finder is tuned
//! for exactly that: a single-slot hint for the repeat case, a last-page
//! fast path, a short descending scan of the final pages, and a binary
//! search only as the fallback for out-of-traversal-order geometry
//! (floated or absolutely positioned content far from its flow position).

use crate::page::page_box::PageBox;
use crate::tree::{BoxId, BoxTree};

/// How many trailing pages the linear scan covers before the lookup falls
/// back to binary search.
const TAIL_SCAN_PAGES: usize = 5;

/// Maps a vertical offset in document space to a page ordinal.
///
/// The hint (`last_requested`) is explicit, collector-owned state — never
/// global — so independent collection passes can each carry their own
/// locality without interfering.
#[derive(Debug, Clone, Default)]
pub struct PageFinder {
    /// The page returned by the previous successful lookup.
    last_requested: usize,
}

impl PageFinder {
    /// Create a finder with a cold hint.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_requested: 0 }
    }

    /// Find the page whose band `[top, bottom)` contains `y`.
    ///
    /// Returns `None` for negative offsets and for offsets at or past the
    /// last page's bottom — both are normal outcomes, not failures.
    ///
    /// The lookup order:
    /// 1. the hinted page from the previous call,
    /// 2. the last page,
    /// 3. a descending linear scan of the final five pages,
    /// 4. binary search over the remaining prefix.
    pub fn find_page(&mut self, pages: &[PageBox], y: f32) -> Option<usize> {
        if y < 0.0 {
            return None;
        }

        if let Some(hinted) = pages.get(self.last_requested) {
            if hinted.contains(y) {
                return Some(self.last_requested);
            }
        }

        let last = pages.last()?;
        let count = pages.len();

        if last.contains(y) {
            self.last_requested = count - 1;
            return Some(count - 1);
        }

        if y >= last.bottom {
            return None;
        }

        // The page we're looking for is probably near the end of the
        // document, so scan the last few pages before falling back to a
        // binary search over the rest.
        for index in (count.saturating_sub(TAIL_SCAN_PAGES)..count).rev() {
            if pages[index].contains(y) {
                self.last_requested = index;
                return Some(index);
            }
        }

        let mut low = 0;
        let mut high = count.saturating_sub(TAIL_SCAN_PAGES);

        while low < high {
            let mid = (low + high) / 2;
            let page = &pages[mid];

            if page.contains(y) {
                self.last_requested = mid;
                return Some(mid);
            }

            if page.top < y {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        None
    }
}

/// One-shot lookup of the first page a box occupies, from the minimum Y of
/// its aggregate bounds. Returns `None` when the box has no paint bounds.
///
/// Builds a fresh finder per call; use [`PageFinder`] directly (or the
/// collector, which owns one) for repeated queries.
#[must_use]
pub fn find_start_page(tree: &BoxTree, id: BoxId, pages: &[PageBox]) -> Option<usize> {
    let bounds = tree.get(id)?.aggregate_bounds()?;
    PageFinder::new().find_page(pages, bounds.min_y())
}

/// One-shot lookup of the last page a box occupies, from the maximum Y of
/// its aggregate bounds. Returns `None` when the box has no paint bounds.
#[must_use]
pub fn find_end_page(tree: &BoxTree, id: BoxId, pages: &[PageBox]) -> Option<usize> {
    let bounds = tree.get(id)?.aggregate_bounds()?;
    PageFinder::new().find_page(pages, bounds.max_y())
}
