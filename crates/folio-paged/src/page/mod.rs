//! Page geometry and the offset-to-page lookup.
//!
//! [§ 3 The Page Model](https://www.w3.org/TR/css-page-3/#page-model)
//!
//! "In paged media, the document is split into one or more discrete
//! pages"; each page box occupies a half-open vertical band of the
//! continuous document coordinate space. The page list is built by an
//! external page-construction stage and queried read-only here.
//!
//! # Module Structure
//!
//! - [`page_box`] - The page geometry record and page-list validation
//! - [`finder`] - Hinted offset-to-page-ordinal lookup

pub mod finder;
pub mod page_box;

// Re-exports for convenience
pub use finder::{PageFinder, find_end_page, find_start_page};
pub use page_box::{PageBox, validate_page_list};
