//! Document-space geometry for paged collection.
//!
//! [CSS Fragmentation Module Level 3](https://www.w3.org/TR/css-break-3/)
//!
//! All coordinates live in the single continuous coordinate space the layout
//! stage produced, before the document is broken into pages. The vertical
//! axis grows downward; page membership is decided purely on Y bands.

use serde::{Deserialize, Serialize};

/// A rectangle positioned in document space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Construct a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The smallest Y coordinate covered by this rectangle.
    #[must_use]
    pub const fn min_y(&self) -> f32 {
        self.y
    }

    /// The largest Y coordinate covered by this rectangle.
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Whether this rectangle and `other` overlap with positive area.
    ///
    /// Rectangles that merely share an edge do not intersect; a culling
    /// test that treated touching edges as overlap would assign a box
    /// sitting exactly on a page boundary to both pages even though it is
    /// visible on only one.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// A clip region constraining what may be visibly painted.
///
/// [§ 11.1.1 Overflow](https://www.w3.org/TR/CSS2/visufx.html#overflow)
///
/// "This property specifies whether content of a block container element
/// is clipped when it overflows the element's box."
///
/// A page's print clipping bounds and a box's overflow clip edge are both
/// represented by this type. The rounded variant arises from
/// `border-radius` on an overflow-clipping box
/// ([§ 5 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClipShape {
    /// A rectangular clip region.
    Rect(Rect),
    /// A rounded-rectangle clip region with a uniform corner radius.
    RoundedRect {
        /// The bounding rectangle of the rounded region.
        rect: Rect,
        /// The uniform corner radius, in document-space units.
        radius: f32,
    },
}

impl ClipShape {
    /// The bounding rectangle of this clip region.
    #[must_use]
    pub const fn bounding_rect(&self) -> Rect {
        match self {
            Self::Rect(rect) | Self::RoundedRect { rect, .. } => *rect,
        }
    }

    /// Whether this clip region intersects the given rectangle.
    ///
    /// The rounded variant tests against its bounding rectangle. The
    /// predicates built on this drive page-membership and culling
    /// decisions, not pixel-exact visibility, so a conservative test can
    /// only over-include content, never lose it.
    #[must_use]
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        self.bounding_rect().intersects(rect)
    }
}
