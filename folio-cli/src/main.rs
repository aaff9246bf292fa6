//! Folio collection CLI
//!
//! A headless driver for testing and debugging: load a JSON scene the way
//! a layout stage would hand it over, run one collection pass per stacking
//! layer, and dump the per-page display lists as JSON.

mod scene;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use folio_common::warning::clear_warnings;
use folio_paged::{
    BoxTree, ClipShape, CollectionMode, DisplayListItem, PageResult, PagedBoxCollector,
    RenderContext,
};

/// Collect a laid-out scene into per-page display lists.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Args {
    /// Path to the scene JSON file.
    #[arg(required_unless_present = "json")]
    scene: Option<PathBuf>,

    /// Inline scene JSON instead of a file.
    #[arg(long, value_name = "JSON")]
    json: Option<String>,

    /// Run a measurement pass: same walk and page assignment, but no clip
    /// markers and no table notifications.
    #[arg(long)]
    measure: bool,
}

/// One display-list entry, flattened for JSON output.
#[derive(Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ItemDump {
    /// A box reference with its kind name.
    Box {
        /// Arena index of the box.
        id: usize,
        /// The box's kind, for readability.
        kind: String,
    },
    /// A clip push marker.
    PushClip {
        /// The region being pushed.
        clip: ClipShape,
    },
    /// A clip restore marker.
    SetClip {
        /// The region being restored.
        clip: ClipShape,
    },
}

/// One page's collected output.
#[derive(Serialize)]
struct PageDump {
    /// Page ordinal.
    page: usize,
    /// Block-level items in paint order.
    blocks: Vec<ItemDump>,
    /// Inline-level items in paint order.
    inlines: Vec<ItemDump>,
    /// Collapsed-border cells tracked on this page.
    table_cells: Vec<usize>,
}

/// The whole collection pass.
#[derive(Serialize)]
struct CollectionDump {
    /// Per-page display lists, in page order.
    pages: Vec<PageDump>,
    /// Tables notified to reposition repeating sections, in encounter
    /// order.
    repositioned_tables: Vec<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let text = if let Some(json) = &args.json {
        json.clone()
    } else if let Some(path) = &args.scene {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    } else {
        bail!("a scene file or --json is required");
    };

    clear_warnings();
    let built = scene::load_scene(&text)?;

    let mode = if args.measure {
        CollectionMode::Measure
    } else {
        CollectionMode::Paint
    };

    let mut ctx = RenderContext::new(mode);
    let mut collector = PagedBoxCollector::new(&built.tree, &built.pages)
        .context("the scene's page list is malformed")?;

    for &layer in &built.layers {
        collector
            .collect(&mut ctx, layer)
            .with_context(|| format!("collection failed in layer {}", layer.0))?;
    }

    let dump = CollectionDump {
        pages: collector
            .page_results()
            .iter()
            .enumerate()
            .map(|(page, result)| dump_page(&built.tree, page, result))
            .collect(),
        repositioned_tables: ctx
            .take_repeating_section_tables()
            .into_iter()
            .map(|id| id.0)
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&dump)?);

    Ok(())
}

fn dump_page(tree: &BoxTree, page: usize, result: &PageResult) -> PageDump {
    PageDump {
        page,
        blocks: result.blocks.iter().map(|item| dump_item(tree, item)).collect(),
        inlines: result
            .inlines
            .iter()
            .map(|item| dump_item(tree, item))
            .collect(),
        table_cells: result.table_cells.iter().map(|id| id.0).collect(),
    }
}

fn dump_item(tree: &BoxTree, item: &DisplayListItem) -> ItemDump {
    match item {
        DisplayListItem::Box(id) => ItemDump::Box {
            id: id.0,
            kind: tree
                .get(*id)
                .map_or_else(|| "unknown".to_string(), |node| node.kind.to_string()),
        },
        DisplayListItem::PushClip(clip) => ItemDump::PushClip { clip: *clip },
        DisplayListItem::SetClip(clip) => ItemDump::SetClip { clip: *clip },
    }
}
