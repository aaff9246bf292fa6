//! JSON scene descriptions for the headless driver.
//!
//! A scene is what a layout stage would hand the collector, flattened to a
//! file: the page list, the layer table, and the box arena with geometry
//! and flags. Box and layer references are plain indices into their
//! arrays, mirroring the arena ids they become.

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use folio_paged::{
    BlockData, BoxId, BoxKind, BoxTree, ClipShape, InlineData, Layer, LayerId, OverflowClip,
    PageBox, PaintInfo, Rect, TableCellData, TableData,
};

/// Default page width when a page carries no explicit clip rectangle:
/// US Letter at 96 dpi.
const DEFAULT_PAGE_WIDTH: f32 = 816.0;

fn default_page_width() -> f32 {
    DEFAULT_PAGE_WIDTH
}

/// A rectangle as it appears in scene JSON.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SceneRect {
    /// Horizontal position of the top-left corner.
    #[serde(default)]
    pub x: f32,
    /// Vertical position of the top-left corner.
    #[serde(default)]
    pub y: f32,
    /// Width of the rectangle.
    #[serde(default)]
    pub width: f32,
    /// Height of the rectangle.
    #[serde(default)]
    pub height: f32,
}

impl From<SceneRect> for Rect {
    fn from(rect: SceneRect) -> Self {
        Rect::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// One page band. When `clip` is absent, the print clip defaults to the
/// page's full band at the scene's page width.
#[derive(Debug, Deserialize)]
pub struct ScenePage {
    /// Document-space Y where the page begins (inclusive).
    pub top: f32,
    /// Document-space Y where the page ends (exclusive).
    pub bottom: f32,
    /// Explicit print clip rectangle, if any.
    #[serde(default)]
    pub clip: Option<SceneRect>,
}

/// One stacking layer.
#[derive(Debug, Deserialize)]
pub struct SceneLayer {
    /// Index of the layer's master box.
    pub master: usize,
    /// Whether the layer is inline-rooted.
    #[serde(default)]
    pub inline: bool,
}

/// The box variants a scene can describe.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// A generic block container box.
    Block,
    /// A table box.
    Table,
    /// A table cell box.
    TableCell,
    /// A line box.
    Line,
    /// An inline content box.
    Inline,
}

/// One box of the scene. Only the fields meaningful for its kind are
/// consulted; the rest default.
#[derive(Debug, Deserialize)]
pub struct SceneBox {
    /// Which variant this box is.
    pub kind: SceneKind,
    /// The box's own border-box rectangle.
    #[serde(default)]
    pub rect: SceneRect,
    /// Aggregate paint bounds; defaults to `rect` when omitted. An
    /// explicit `null` is the same as omitting it.
    #[serde(default)]
    pub bounds: Option<SceneRect>,
    /// Set when layout produced no paint data for this box at all.
    #[serde(default)]
    pub no_paint_info: bool,
    /// Children, in paint order, as box indices.
    #[serde(default)]
    pub children: Vec<usize>,
    /// The layer this box masters, if any.
    #[serde(default)]
    pub layer: Option<usize>,
    /// The layer responsible for painting this box.
    #[serde(default)]
    pub containing_layer: usize,
    /// True for a block-level box participating in inline flow.
    #[serde(default)]
    pub inline_level: bool,
    /// Overflow clip edge, when the box clips its children on paint.
    #[serde(default)]
    pub clip_edge: Option<SceneRect>,
    /// Corner radius of the overflow clip.
    #[serde(default)]
    pub clip_radius: f32,
    /// True when a table has a repeating header/footer region.
    #[serde(default)]
    pub repeating_sections: bool,
    /// True when a table cell paints a collapsed border.
    #[serde(default)]
    pub collapsed_border: bool,
    /// Flat elements-with-content list for an inline layer master.
    #[serde(default)]
    pub content: Vec<usize>,
}

/// A whole scene file.
#[derive(Debug, Deserialize)]
pub struct Scene {
    /// Width used for defaulted page clips.
    #[serde(default = "default_page_width")]
    pub page_width: f32,
    /// The ordered page list.
    pub pages: Vec<ScenePage>,
    /// The layer table; layer 0 is the root stacking context.
    pub layers: Vec<SceneLayer>,
    /// The box arena; indices are the ids.
    pub boxes: Vec<SceneBox>,
}

/// A scene realized as collector inputs.
#[derive(Debug)]
pub struct BuiltScene {
    /// The box tree, with the layer table inside.
    pub tree: BoxTree,
    /// The finalized page list.
    pub pages: Vec<PageBox>,
    /// The layer ids, in table order, to collect in sequence.
    pub layers: Vec<LayerId>,
}

/// Parse and realize a JSON scene.
///
/// # Errors
///
/// Fails on malformed JSON, or on box/layer indices that point outside
/// their arrays.
pub fn load_scene(json: &str) -> Result<BuiltScene> {
    let scene: Scene = serde_json::from_str(json).context("failed to parse scene JSON")?;
    build_scene(&scene)
}

fn build_scene(scene: &Scene) -> Result<BuiltScene> {
    let box_count = scene.boxes.len();
    let layer_count = scene.layers.len();

    let mut tree = BoxTree::new();

    // STEP 1: Allocate every box so indices and arena ids coincide.
    for (index, scene_box) in scene.boxes.iter().enumerate() {
        if scene_box.containing_layer >= layer_count {
            bail!(
                "box {index} names containing layer {} but the scene has {layer_count} layers",
                scene_box.containing_layer
            );
        }

        let kind = realize_kind(scene_box, box_count)
            .with_context(|| format!("box {index} is malformed"))?;
        let id = tree.alloc(kind, LayerId(scene_box.containing_layer));
        debug_assert_eq!(id, BoxId(index));

        let node = tree.node_mut(id).expect("box was just allocated");
        node.border_rect = scene_box.rect.into();
        if !scene_box.no_paint_info {
            node.paint_info = Some(PaintInfo {
                aggregate_bounds: scene_box.bounds.unwrap_or(scene_box.rect).into(),
            });
        }
        if let Some(edge) = scene_box.clip_edge {
            node.overflow_clip = Some(OverflowClip {
                edge: edge.into(),
                radius: scene_box.clip_radius,
            });
        }
    }

    // STEP 2: Wire children and the layer back-links.
    for (index, scene_box) in scene.boxes.iter().enumerate() {
        for &child in &scene_box.children {
            if child >= box_count {
                bail!("box {index} names child {child} but the scene has {box_count} boxes");
            }
            tree.append_child(BoxId(index), BoxId(child));
        }

        if let Some(layer) = scene_box.layer {
            if layer >= layer_count {
                bail!("box {index} masters layer {layer} but the scene has {layer_count} layers");
            }
            tree.node_mut(BoxId(index)).expect("box exists").layer = Some(LayerId(layer));
        }
    }

    // STEP 3: Realize the layer table.
    let mut layers = Vec::with_capacity(layer_count);
    for (index, scene_layer) in scene.layers.iter().enumerate() {
        if scene_layer.master >= box_count {
            bail!(
                "layer {index} names master {} but the scene has {box_count} boxes",
                scene_layer.master
            );
        }
        let layer = if scene_layer.inline {
            Layer::new_inline(BoxId(scene_layer.master))
        } else {
            Layer::new(BoxId(scene_layer.master))
        };
        layers.push(tree.alloc_layer(layer));
    }

    // STEP 4: Realize the page list, defaulting absent clips to the full
    // page band.
    let pages = scene
        .pages
        .iter()
        .map(|page| PageBox {
            top: page.top,
            bottom: page.bottom,
            print_clip: ClipShape::Rect(page.clip.map_or_else(
                || Rect::new(0.0, page.top, scene.page_width, page.bottom - page.top),
                Rect::from,
            )),
        })
        .collect();

    Ok(BuiltScene { tree, pages, layers })
}

fn realize_kind(scene_box: &SceneBox, box_count: usize) -> Result<BoxKind> {
    Ok(match scene_box.kind {
        SceneKind::Block => BoxKind::Block(BlockData {
            inline_level: scene_box.inline_level,
        }),
        SceneKind::Table => BoxKind::Table(TableData {
            inline_level: scene_box.inline_level,
            repeating_sections: scene_box.repeating_sections,
        }),
        SceneKind::TableCell => BoxKind::TableCell(TableCellData {
            collapsed_border: scene_box.collapsed_border,
        }),
        SceneKind::Line => BoxKind::Line,
        SceneKind::Inline => {
            let mut elements = Vec::with_capacity(scene_box.content.len());
            for &element in &scene_box.content {
                if element >= box_count {
                    bail!("content element {element} is outside the box array");
                }
                elements.push(BoxId(element));
            }
            BoxKind::InlineContent(InlineData {
                elements_with_content: elements,
            })
        }
    })
}
