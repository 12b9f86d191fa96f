//! Pane layout: the split tree and the rectangles it produces.
//!
//! - [`tree`]: Binary split tree with split/remove/resize operations
//! - [`rect`]: Cell rectangles, separators and hit-testing

pub mod rect;
pub mod tree;

pub use rect::{Layout, Rect, Separator};
pub use tree::{Direction, LeafPath, Side, Split, SplitNode, SplitTree, TreeError};
