//! Cell rectangles produced by the layout pass.

use crate::windows::WindowId;

/// A rectangle of terminal cells. Coordinates are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.y && row < self.y + self.height && col >= self.x && col < self.x + self.width
    }
}

/// A one-column divider drawn between side-by-side panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    pub x: usize,
    pub y: usize,
    pub height: usize,
}

/// Result of laying out a split tree over an area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Pane rectangles in leaf order.
    pub panes: Vec<(WindowId, Rect)>,
    pub separators: Vec<Separator>,
}

impl Layout {
    /// Returns the window whose pane covers the given cell.
    #[must_use]
    pub fn pane_at(&self, row: usize, col: usize) -> Option<WindowId> {
        self.panes
            .iter()
            .find(|(_, rect)| rect.contains(row, col))
            .map(|(id, _)| *id)
    }

    #[must_use]
    pub fn rect_of(&self, window: WindowId) -> Option<Rect> {
        self.panes
            .iter()
            .find(|(id, _)| *id == window)
            .map(|(_, rect)| *rect)
    }
}
