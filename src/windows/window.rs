//! Windows and the buffers they display.

use super::resources::ResourceId;
use crate::domain::{ContentClass, Entry};

/// Window identifier. Assigned from 1 upward and never reused.
pub type WindowId = u32;

/// Smallest viewer zoom factor.
pub const ZOOM_MIN: f64 = 0.5;

/// Largest viewer zoom factor.
pub const ZOOM_MAX: f64 = 4.0;

/// Payload kind without the payload, for logging and view models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Empty,
    Explorer,
    Viewer,
}

/// Directory listing state of an explorer window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerBuffer {
    pub cwd: String,
    pub entries: Vec<Entry>,
    pub cursor: usize,
    pub loading: bool,
    pub error: Option<String>,
    /// Set while `entries` hold recursive search results for this query.
    pub search_query: Option<String>,
}

impl ExplorerBuffer {
    #[must_use]
    pub fn new(cwd: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            entries: Vec::new(),
            cursor: 0,
            loading: false,
            error: None,
            search_query: None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Entry> {
        self.entries.get(self.cursor)
    }

    /// Moves the cursor by `delta` rows, clamped to the listing.
    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.entries.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn clamp_cursor(&mut self) {
        self.move_cursor(0);
    }
}

/// File preview state of a viewer window.
///
/// The viewer is pending while it has neither `text` nor `resource`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerBuffer {
    pub path: String,
    pub content_type: Option<String>,
    pub class: Option<ContentClass>,
    pub text: Option<String>,
    pub resource: Option<ResourceId>,
    pub zoom: f64,
    pub scroll: usize,
    /// Number of scrollable display lines for the loaded content.
    pub line_count: usize,
    /// `true` when only a prefix of the file was fetched.
    pub truncated: bool,
}

impl ViewerBuffer {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content_type: None,
            class: None,
            text: None,
            resource: None,
            zoom: 1.0,
            scroll: 0,
            line_count: 0,
            truncated: false,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.text.is_none() && self.resource.is_none()
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let last = self.line_count.saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(last);
    }

    /// Adjusts zoom for paginated content. Returns `false` when the content
    /// is not zoomable.
    pub fn zoom_by(&mut self, delta: f64) -> bool {
        if self.class != Some(ContentClass::Paginated) {
            return false;
        }
        self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
        true
    }

    pub fn reset_zoom(&mut self) -> bool {
        if self.class != Some(ContentClass::Paginated) {
            return false;
        }
        self.zoom = 1.0;
        true
    }
}

/// The payload of a window. Exactly one variant is live at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Buffer {
    #[default]
    Empty,
    Explorer(ExplorerBuffer),
    Viewer(ViewerBuffer),
}

impl Buffer {
    #[must_use]
    pub const fn kind(&self) -> BufferKind {
        match self {
            Self::Empty => BufferKind::Empty,
            Self::Explorer(_) => BufferKind::Explorer,
            Self::Viewer(_) => BufferKind::Viewer,
        }
    }

    /// The transient resource held by this buffer, if any.
    #[must_use]
    pub const fn resource(&self) -> Option<ResourceId> {
        match self {
            Self::Viewer(viewer) => viewer.resource,
            _ => None,
        }
    }
}

/// A pane payload registered under an id.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub id: WindowId,
    pub buffer: Buffer,
    /// Incremented whenever a request is issued for this window; responses
    /// carrying an older value are stale.
    pub generation: u64,
}

impl Window {
    #[must_use]
    pub const fn new(id: WindowId) -> Self {
        Self {
            id,
            buffer: Buffer::Empty,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn explorer(&self) -> Option<&ExplorerBuffer> {
        match &self.buffer {
            Buffer::Explorer(explorer) => Some(explorer),
            _ => None,
        }
    }

    pub fn explorer_mut(&mut self) -> Option<&mut ExplorerBuffer> {
        match &mut self.buffer {
            Buffer::Explorer(explorer) => Some(explorer),
            _ => None,
        }
    }

    #[must_use]
    pub const fn viewer(&self) -> Option<&ViewerBuffer> {
        match &self.buffer {
            Buffer::Viewer(viewer) => Some(viewer),
            _ => None,
        }
    }

    pub fn viewer_mut(&mut self) -> Option<&mut ViewerBuffer> {
        match &mut self.buffer {
            Buffer::Viewer(viewer) => Some(viewer),
            _ => None,
        }
    }
}
