//! View model types representing renderable UI state.
//!
//! Computed by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They hold display-ready data only: rows are
//! already windowed to the pane height and highlight ranges pre-computed.

use crate::layout::{Rect, Separator};
use crate::windows::WindowId;

#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// One entry per leaf, in tree order.
    pub panes: Vec<PaneView>,
    pub separators: Vec<Separator>,
    pub status: StatusBar,
}

#[derive(Debug, Clone)]
pub struct PaneView {
    pub window: WindowId,
    /// Cell rectangle including the title row.
    pub rect: Rect,
    pub focused: bool,
    pub title: PaneTitle,
    pub body: PaneBody,
}

/// The first row of a pane.
#[derive(Debug, Clone)]
pub struct PaneTitle {
    pub id: WindowId,
    pub kind: &'static str,
    pub text: String,
    /// Right-aligned annotation such as loading state or zoom.
    pub note: String,
}

#[derive(Debug, Clone)]
pub enum PaneBody {
    Empty(EmptyState),
    /// A single centred line, e.g. loading or error text.
    Message { text: String, is_error: bool },
    Entries(Vec<DisplayItem>),
    Lines(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub name: String,
    /// Dimmed text after the name; the parent directory of a search hit.
    pub detail: String,
    pub is_dir: bool,
    pub is_selected: bool,
    /// `(start, end)` character ranges, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct StatusBar {
    /// Zero-based screen row.
    pub row: usize,
    pub mode: &'static str,
    /// Present in command and search mode.
    pub prompt: Option<PromptInfo>,
    pub error: Option<String>,
    pub hint: String,
    pub position: String,
}

#[derive(Debug, Clone)]
pub struct PromptInfo {
    pub glyph: char,
    pub buffer: String,
}
