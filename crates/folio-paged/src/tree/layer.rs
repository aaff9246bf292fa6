//! Stacking layers.
//!
//! [§ 9.9 Layered presentation](https://www.w3.org/TR/CSS2/visuren.html#layers)
//!
//! "Each box belongs to one stacking context." A layer is the painting
//! scope of one stacking context: boxes within one layer are collected
//! together and never recursed into from a different layer's walk. How
//! layers are composited against each other is the consumer's business;
//! this crate only refuses to cross a layer boundary.

use serde::{Deserialize, Serialize};

use super::box_tree::BoxId;

/// A type-safe index into the box tree's layer table.
///
/// Boxes refer to the layer responsible for painting them through this id,
/// never through an owning reference, so layers and their box subtrees
/// cannot form ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub usize);

impl LayerId {
    /// The root stacking context is always at index 0.
    pub const ROOT: LayerId = LayerId(0);
}

/// A stacking layer: the painting scope of one stacking context.
///
/// [§ 9.9.1 Specifying the stack level](https://www.w3.org/TR/CSS2/visuren.html#z-index)
///
/// "The root element forms the root stacking context." Further layers are
/// created by positioned boxes with a stack level, by opacity, and by the
/// other stacking-context-forming properties; which boxes form layers is
/// decided by the external layout stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// The box this layer is rooted at (its master).
    pub master: BoxId,

    /// True when the whole layer is inline content rather than a block
    /// subtree — a stacking context created on a non-replaced inline box.
    ///
    /// [§ 9.9 Layered presentation](https://www.w3.org/TR/CSS2/visuren.html#layers)
    pub inline: bool,
}

impl Layer {
    /// Create a block-rooted layer at `master`.
    #[must_use]
    pub const fn new(master: BoxId) -> Self {
        Self {
            master,
            inline: false,
        }
    }

    /// Create an inline-rooted layer at `master`.
    #[must_use]
    pub const fn new_inline(master: BoxId) -> Self {
        Self {
            master,
            inline: true,
        }
    }
}
