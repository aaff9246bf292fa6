//! The paged box collector.
//!
//! [CSS Fragmentation Module Level 3 § 3](https://www.w3.org/TR/css-break-3/#fragmentation-model)
//!
//! "In paged media, content is fragmented into page boxes." Layout has
//! already positioned every box in one continuous coordinate space; the
//! collector partitions that tree, one stacking layer per call, into flat
//! per-page display lists, inserting clip push/restore markers where
//! overflow clipping changes.
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The walk never crosses a layer boundary: boxes whose containing layer
//! differs from the layer being collected are left for that layer's own
//! collection call, and how the layers composite is the consumer's
//! business.

use folio_common::warning::warn_once;

use crate::context::RenderContext;
use crate::error::CollectError;
use crate::geometry::ClipShape;
use crate::page::finder::PageFinder;
use crate::page::page_box::{PageBox, validate_page_list};
use crate::paint::display_list::{DisplayListItem, PageResult};
use crate::paint::predicates::{intersects_aggregate_bounds, intersects_any};
use crate::tree::{BoxId, BoxKind, BoxNode, BoxTree, LayerId};

/// Collects the paintable boxes of a laid-out tree into per-page display
/// lists.
///
/// One collector serves one collection pass over one page list: the caller
/// invokes [`PagedBoxCollector::collect`] once per stacking layer, then
/// takes the accumulated [`PageResult`]s. The accumulators are append-only
/// and shared across the per-layer calls, so results across layers
/// interleave by call order; paint order is preserved within each layer's
/// own contribution.
pub struct PagedBoxCollector<'a> {
    tree: &'a BoxTree,
    pages: &'a [PageBox],
    finder: PageFinder,
    results: Vec<PageResult>,
}

impl<'a> PagedBoxCollector<'a> {
    /// Create a collector over `tree` and the finalized page list.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectError`] when the page list is empty, unsorted,
    /// or overlapping — a contract breach from the page-construction
    /// stage. Collecting against a malformed list would mis-assign every
    /// box after the defect, so the pass refuses to start.
    pub fn new(tree: &'a BoxTree, pages: &'a [PageBox]) -> Result<Self, CollectError> {
        validate_page_list(pages)?;

        Ok(Self {
            tree,
            pages,
            finder: PageFinder::new(),
            results: vec![PageResult::new(); pages.len()],
        })
    }

    /// Collect every paintable item belonging to `layer` into the shared
    /// per-page accumulators.
    ///
    /// An inline-rooted layer walks its master's flat content list; a
    /// block-rooted layer recurses depth-first from its master. An unknown
    /// layer id collects nothing.
    ///
    /// # Errors
    ///
    /// [`CollectError::InvertedPageRange`] when a box's aggregate bounds
    /// place its end page before its start page — corrupt upstream
    /// geometry. The pass aborts rather than emit unbalanced clip markers.
    pub fn collect(
        &mut self,
        ctx: &mut RenderContext,
        layer_id: LayerId,
    ) -> Result<(), CollectError> {
        let tree = self.tree;
        let Some(layer) = tree.layers().get(layer_id.0) else {
            return Ok(());
        };

        if layer.inline {
            self.collect_inline(ctx, layer_id, layer.master)
        } else {
            self.collect_box(ctx, layer_id, layer.master, layer.master, None)
        }
    }

    /// The accumulated results, one per page, indexed by page ordinal.
    #[must_use]
    pub fn page_results(&self) -> &[PageResult] {
        &self.results
    }

    /// Consume the collector, handing the per-page results to the paint
    /// backend.
    #[must_use]
    pub fn into_page_results(self) -> Vec<PageResult> {
        self.results
    }

    /// Raw lookup of the first page `id` occupies, from the minimum Y of
    /// its aggregate bounds. `None` when the box has no paint bounds or
    /// starts outside every page; no clamping is applied.
    pub fn find_start_page(&mut self, id: BoxId) -> Option<usize> {
        let bounds = self.tree.get(id)?.aggregate_bounds()?;
        self.finder.find_page(self.pages, bounds.min_y())
    }

    /// Raw lookup of the last page `id` occupies, from the maximum Y of
    /// its aggregate bounds. `None` when the box has no paint bounds or
    /// ends outside every page; no clamping is applied.
    pub fn find_end_page(&mut self, id: BoxId) -> Option<usize> {
        let bounds = self.tree.get(id)?.aggregate_bounds()?;
        self.finder.find_page(self.pages, bounds.max_y())
    }

    /// Collect an inline-rooted layer.
    ///
    /// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    ///
    /// The layer's master is an inline content box whose flat list of
    /// elements with content was pre-computed by layout. Inline content is
    /// appended by its exact rectangle; an inline-level block (e.g.
    /// `inline-block`) is admitted only if something in its subtree
    /// actually intersects the page, because its own aggregate bounds may
    /// be looser than its visible descendants; a true block starts a new
    /// clipping and recursion scope and is dispatched into the block walk
    /// exactly once.
    fn collect_inline(
        &mut self,
        ctx: &mut RenderContext,
        layer_id: LayerId,
        master: BoxId,
    ) -> Result<(), CollectError> {
        let tree = self.tree;
        let Some(master_node) = tree.get(master) else {
            return Ok(());
        };

        let BoxKind::InlineContent(data) = &master_node.kind else {
            warn_once(
                "Collect",
                &format!(
                    "inline layer {} is not rooted at inline content; skipping",
                    layer_id.0
                ),
            );
            return Ok(());
        };

        for &element_id in &data.elements_with_content {
            let Some(element) = tree.get(element_id) else {
                continue;
            };

            let Some((start, end)) = self.page_range(element_id, element)? else {
                continue;
            };

            let mut dispatched = false;

            for page in start..=end {
                let page_clip = self.pages[page].print_clip;

                if !page_clip.intersects_rect(&element.border_rect) {
                    continue;
                }

                match &element.kind {
                    BoxKind::InlineContent(_) | BoxKind::Line => {
                        self.results[page]
                            .inlines
                            .push(DisplayListItem::Box(element_id));
                    }
                    BoxKind::Block(_) | BoxKind::Table(_) | BoxKind::TableCell(_) => {
                        if element.is_inline_level() {
                            if intersects_any(tree, &page_clip, element_id, element_id) {
                                self.results[page]
                                    .inlines
                                    .push(DisplayListItem::Box(element_id));
                            }
                        } else if !dispatched {
                            // A block reached from inline content spans the
                            // same pages on every iteration; the block walk
                            // re-tests each page itself, so dispatching per
                            // page would duplicate it.
                            dispatched = true;
                            self.collect_box(ctx, layer_id, master, element_id, None)?;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// The main box collection method. Works recursively to add all the
    /// boxes owned by `layer_id` (inlines and blocks separately) to their
    /// respective flat page display lists, and adds clip push/restore
    /// markers where needed to clip content in overflow-clipping blocks.
    ///
    /// [§ 11.1.1 Overflow](https://www.w3.org/TR/CSS2/visufx.html#overflow)
    fn collect_box(
        &mut self,
        ctx: &mut RenderContext,
        layer_id: LayerId,
        master: BoxId,
        container_id: BoxId,
        parent_clip: Option<ClipShape>,
    ) -> Result<(), CollectError> {
        let tree = self.tree;
        let Some(container) = tree.get(container_id) else {
            return Ok(());
        };

        // Different layers are responsible for their own box collection.
        if container.containing_layer != layer_id {
            return Ok(());
        }

        if matches!(container.kind, BoxKind::Line) {
            // A line box is never itself clipped or layered. Its inline
            // children were flattened by layout; append the line plus all
            // its same-layer descendants to every page in range and stop.
            let Some((start, end)) = self.page_range(container_id, container)? else {
                return Ok(());
            };

            for page in start..=end {
                let inlines = &mut self.results[page].inlines;
                inlines.push(DisplayListItem::Box(container_id));
                Self::append_line_descendants(tree, layer_id, container_id, inlines);
            }

            return Ok(());
        }

        let mut our_clip: Option<ClipShape> = None;
        let mut range: Option<(usize, usize)> = None;

        // A block box that roots a layer contributes its own box through
        // the layer compositor, not through this walk; only its
        // descendants are collected here.
        if container.layer.is_none() || !container.is_block_box() {
            range = self.page_range(container_id, container)?;

            // Check if we need to clip this box.
            if ctx.is_paint() && container.is_block_box() {
                if let Some(clip) = &container.overflow_clip {
                    // A box with overflow set to hidden.
                    our_clip = Some(clip.shape());
                }
            }

            if let Some((start, end)) = range {
                for page in start..=end {
                    let page_clip = self.pages[page].print_clip;

                    // Test to see if it fits within the page margins.
                    if intersects_aggregate_bounds(Some(&page_clip), container) {
                        let result = &mut self.results[page];

                        if let Some(clip) = our_clip {
                            // The clip applies to the block and its
                            // descendants, inline or block, so it brackets
                            // both sequences.
                            result.blocks.push(DisplayListItem::PushClip(clip));
                            result.inlines.push(DisplayListItem::PushClip(clip));
                        }

                        result.blocks.push(DisplayListItem::Box(container_id));

                        if let BoxKind::TableCell(cell) = &container.kind {
                            if cell.collapsed_border {
                                result.table_cells.push(container_id);
                            }
                        }
                    }
                }
            }

            if ctx.is_paint() {
                if let BoxKind::Table(table) = &container.kind {
                    if table.repeating_sections {
                        ctx.notify_repeating_sections(container_id);
                    }
                }
            }
        }

        // Recursively, process all children and their children. Descend
        // only if this box does not start its own layer, or is exactly the
        // master of the layer being collected (re-entry at the root).
        if container.layer.is_none() || container_id == master {
            let child_clip = our_clip.or(parent_clip);

            for &child in &container.children {
                self.collect_box(ctx, layer_id, master, child, child_clip)?;
            }
        }

        if our_clip.is_some() {
            // Restore the clip on the pages it was changed on, so siblings
            // painted after this subtree see the enclosing region again.
            if let Some((start, end)) = range {
                for page in start..=end {
                    let page_clip = self.pages[page].print_clip;

                    if intersects_aggregate_bounds(Some(&page_clip), container) {
                        // Restore to the parent clip, or to the page's own
                        // print clip if we were at the top of the clips.
                        let restore = parent_clip.unwrap_or(page_clip);
                        let result = &mut self.results[page];

                        result.blocks.push(DisplayListItem::SetClip(restore));
                        result.inlines.push(DisplayListItem::SetClip(restore));
                    }
                }
            }
        }

        Ok(())
    }

    /// Recursively append all of a line box's same-layer descendants to a
    /// page's inline sequence, in paint order.
    fn append_line_descendants(
        tree: &BoxTree,
        layer_id: LayerId,
        id: BoxId,
        inlines: &mut Vec<DisplayListItem>,
    ) {
        for &child in tree.children(id) {
            let Some(node) = tree.get(child) else {
                continue;
            };

            if node.containing_layer != layer_id {
                continue;
            }

            inlines.push(DisplayListItem::Box(child));
            Self::append_line_descendants(tree, layer_id, child, inlines);
        }
    }

    /// The inclusive page range a box's aggregate bounds fall into, or
    /// `None` when the box can land on no page (no paint bounds, entirely
    /// above the document, or entirely past the last page).
    ///
    /// Content that starts above the first page but ends on a real page is
    /// clamped to start at page 0, with a deduplicated warning: the
    /// geometry is well-defined and dropping it would lose visible
    /// content. Symmetrically, content running past the last page's bottom
    /// is clamped to end on the last page.
    fn page_range(
        &mut self,
        id: BoxId,
        node: &BoxNode,
    ) -> Result<Option<(usize, usize)>, CollectError> {
        let Some(bounds) = node.aggregate_bounds() else {
            return Ok(None);
        };

        let last_index = self.pages.len() - 1;
        let last_bottom = self.pages[last_index].bottom;
        let min_y = bounds.min_y();
        let max_y = bounds.max_y();

        if max_y < 0.0 || min_y >= last_bottom {
            return Ok(None);
        }

        let start = if min_y < 0.0 {
            warn_once(
                "Collect",
                &format!("box {} starts above the first page; clamping to page 0", id.0),
            );
            0
        } else {
            self.finder.find_page(self.pages, min_y).unwrap_or(0)
        };

        let end = if max_y >= last_bottom {
            last_index
        } else {
            self.finder.find_page(self.pages, max_y).unwrap_or(last_index)
        };

        if end < start {
            return Err(CollectError::InvertedPageRange { box_id: id });
        }

        Ok(Some((start, end)))
    }
}
