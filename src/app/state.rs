//! Application state and view model computation.
//!
//! [`AppState`] is the single value `handle_event` mutates. It owns the
//! [`Workspace`] (split tree, windows, focus), the modal input state, the
//! status hint and the theme. View models are computed from it on demand.

use super::modes::{InputMode, Prompt};
use crate::domain::{ContentClass, Entry};
use crate::infrastructure::paths::parent_path;
use crate::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, PaneBody, PaneTitle, PaneView, PromptInfo, StatusBar, UIViewModel,
};
use crate::windows::{
    Buffer, ExplorerBuffer, ViewerBuffer, Window, WindowId, Workspace, WorkspaceSettings,
    HEX_ROW_BYTES,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows reserved below the panes for the global status bar.
pub const STATUS_BAR_ROWS: usize = 1;

/// Hint shown when the plugin starts.
pub const READY_HINT: &str = "Ready. Ctrl+N to open explorer. ':' for commands.";

/// Step sizes for keyboard resizing and zooming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    pub resize_step: f64,
    pub zoom_step: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            resize_step: 0.15,
            zoom_step: 0.25,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub workspace: Workspace,
    pub mode: InputMode,
    pub prompt: Prompt,
    /// Transient message shown in the status bar.
    pub hint: String,
    pub controls: ControlSettings,
    pub theme: Theme,
    /// Last known plugin size as `(rows, cols)`.
    viewport: (usize, usize),
}

impl AppState {
    #[must_use]
    pub fn new(settings: WorkspaceSettings, controls: ControlSettings, theme: Theme) -> Self {
        Self {
            workspace: Workspace::new(settings),
            mode: InputMode::Normal,
            prompt: Prompt::default(),
            hint: READY_HINT.to_string(),
            controls,
            theme,
            viewport: (24, 80),
        }
    }

    /// Records the plugin size. Called before every render so mouse
    /// hit-testing and paging use the dimensions last drawn.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    #[must_use]
    pub const fn viewport(&self) -> (usize, usize) {
        self.viewport
    }

    /// Cell area shared by the panes.
    #[must_use]
    pub const fn pane_area(&self) -> Rect {
        let (rows, cols) = self.viewport;
        Rect::new(0, 0, cols, rows.saturating_sub(STATUS_BAR_ROWS))
    }

    pub fn set_hint(&mut self, hint: impl Into<String>) {
        self.hint = hint.into();
    }

    #[must_use]
    pub fn focused_window(&self) -> Option<&Window> {
        self.workspace.focused_window()
    }

    /// Number of content rows of the focused pane, at least 1.
    #[must_use]
    pub fn focused_body_height(&self) -> usize {
        self.workspace
            .layout(self.pane_area())
            .rect_of(self.workspace.focused_id())
            .map_or(1, |rect| rect.height.saturating_sub(1).max(1))
    }

    /// Maps a screen row inside pane `id`, laid out at `rect`, to the index
    /// of the explorer entry drawn on it.
    #[must_use]
    pub fn explorer_row_at(&self, id: WindowId, rect: Rect, row: usize) -> Option<usize> {
        let explorer = self.workspace.window(id)?.explorer()?;
        if explorer.error.is_some() || explorer.entries.is_empty() {
            return None;
        }
        let offset = row.checked_sub(rect.y + 1)?;
        let (start, end) = visible_window(
            explorer.cursor,
            explorer.entries.len(),
            rect.height.saturating_sub(1),
        );
        let index = start + offset;
        (index < end).then_some(index)
    }

    /// Builds the view model for a `rows` x `cols` plugin area.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let area = Rect::new(0, 0, cols, rows.saturating_sub(STATUS_BAR_ROWS));
        let layout = self.workspace.layout(area);
        let focused = self.workspace.focused_id();

        let panes = layout
            .panes
            .iter()
            .filter_map(|(id, rect)| {
                let window = self.workspace.window(*id)?;
                Some(self.compute_pane(window, *rect, *id == focused))
            })
            .collect();

        UIViewModel {
            panes,
            separators: layout.separators,
            status: self.compute_status_bar(rows.saturating_sub(1)),
        }
    }

    fn compute_pane(&self, window: &Window, rect: Rect, focused: bool) -> PaneView {
        let body_rows = rect.height.saturating_sub(1);
        let (title, body) = match &window.buffer {
            Buffer::Empty => (
                PaneTitle {
                    id: window.id,
                    kind: "EMPTY",
                    text: "No buffer".to_string(),
                    note: String::new(),
                },
                PaneBody::Empty(EmptyState {
                    message: "Empty window".to_string(),
                    subtitle: "Ctrl+N explorer  :vspl :spl split  :q close  Ctrl+1..9 focus"
                        .to_string(),
                }),
            ),
            Buffer::Explorer(explorer) => (
                Self::explorer_title(window.id, explorer),
                Self::explorer_body(explorer, body_rows, rect.width),
            ),
            Buffer::Viewer(viewer) => (
                Self::viewer_title(window.id, viewer),
                self.viewer_body(viewer, body_rows),
            ),
        };

        PaneView {
            window: window.id,
            rect,
            focused,
            title,
            body,
        }
    }

    fn explorer_title(id: WindowId, explorer: &ExplorerBuffer) -> PaneTitle {
        let text = match &explorer.search_query {
            Some(query) => format!("{} [search: {query}]", explorer.cwd),
            None => explorer.cwd.clone(),
        };
        let note = if explorer.loading {
            "loading…"
        } else if explorer.error.is_some() {
            "error"
        } else {
            "j/k, Enter"
        };

        PaneTitle {
            id,
            kind: "EXPLORER",
            text,
            note: note.to_string(),
        }
    }

    fn explorer_body(explorer: &ExplorerBuffer, rows: usize, cols: usize) -> PaneBody {
        if let Some(error) = &explorer.error {
            return PaneBody::Message {
                text: format!("Explorer error: {error}"),
                is_error: true,
            };
        }
        if explorer.entries.is_empty() {
            let text = if explorer.loading {
                "Loading directory…"
            } else if explorer.search_query.is_some() {
                "No matches."
            } else {
                "Empty directory."
            };
            return PaneBody::Message {
                text: text.to_string(),
                is_error: false,
            };
        }

        let (start, end) = visible_window(explorer.cursor, explorer.entries.len(), rows);
        let matcher = explorer.search_query.as_ref().map(|_| SkimMatcherV2::default());

        let items = explorer.entries[start..end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                Self::compute_display_item(
                    entry,
                    start + offset == explorer.cursor,
                    explorer.search_query.as_deref().zip(matcher.as_ref()),
                    cols,
                )
            })
            .collect();

        PaneBody::Entries(items)
    }

    fn compute_display_item(
        entry: &Entry,
        is_selected: bool,
        search: Option<(&str, &SkimMatcherV2)>,
        cols: usize,
    ) -> DisplayItem {
        let highlight_ranges = search
            .map(|(query, matcher)| compute_highlight_ranges(&entry.name, query, matcher))
            .unwrap_or_default();

        let detail = entry
            .full_path
            .as_deref()
            .map(|path| {
                let parent = parent_path(path);
                let max = cols.saturating_sub(entry.name.chars().count() + 4);
                truncate_start(&parent, max)
            })
            .unwrap_or_default();

        DisplayItem {
            name: entry.name.clone(),
            detail,
            is_dir: entry.kind.is_dir(),
            is_selected,
            highlight_ranges,
        }
    }

    fn viewer_title(id: WindowId, viewer: &ViewerBuffer) -> PaneTitle {
        let mut notes = Vec::new();
        if viewer.is_pending() {
            notes.push("loading…".to_string());
        }
        if let Some(content_type) = &viewer.content_type {
            notes.push(content_type.clone());
        }
        if viewer.class == Some(ContentClass::Paginated) {
            notes.push(format!("zoom {:.0}%", viewer.zoom * 100.0));
        }
        if viewer.truncated {
            notes.push("truncated".to_string());
        }

        PaneTitle {
            id,
            kind: "VIEWER",
            text: viewer.path.clone(),
            note: notes.join("  "),
        }
    }

    fn viewer_body(&self, viewer: &ViewerBuffer, rows: usize) -> PaneBody {
        if let Some(text) = &viewer.text {
            let lines = text
                .lines()
                .skip(viewer.scroll)
                .take(rows)
                .map(|line| line.replace('\t', "    "))
                .collect();
            return PaneBody::Lines(lines);
        }

        let Some(resource) = viewer
            .resource
            .and_then(|id| self.workspace.registry().resource(id))
        else {
            return PaneBody::Message {
                text: format!("Loading {}…", viewer.path),
                is_error: false,
            };
        };

        let lines = match resource.page_count {
            Some(pages) => vec![
                "PDF document".to_string(),
                format!("{pages} pages, {}", format_size(resource.total_size)),
                format!("zoom {:.0}%  (+ / - / =)", viewer.zoom * 100.0),
                String::new(),
                "Press e to open it outside the plugin.".to_string(),
            ],
            None => resource
                .bytes
                .chunks(HEX_ROW_BYTES)
                .enumerate()
                .skip(viewer.scroll)
                .take(rows)
                .map(|(row, chunk)| hex_line(row * HEX_ROW_BYTES, chunk))
                .collect(),
        };
        PaneBody::Lines(lines)
    }

    fn compute_status_bar(&self, row: usize) -> StatusBar {
        let prompt = self.mode.prompt_glyph().map(|glyph| PromptInfo {
            glyph,
            buffer: self.prompt.buffer.clone(),
        });

        StatusBar {
            row,
            mode: self.mode.label(),
            prompt,
            error: self.prompt.error.clone(),
            hint: self.hint.clone(),
            position: format!(
                "win {} of {}",
                self.workspace.focused_id(),
                self.workspace.registry().len()
            ),
        }
    }
}

/// Range of list rows to show so that `cursor` stays visible, centred when
/// the list is longer than the pane.
fn visible_window(cursor: usize, len: usize, rows: usize) -> (usize, usize) {
    let rows = rows.max(1);
    let mut start = cursor.saturating_sub(rows / 2);
    let end = (start + rows).min(len);
    if end - start < rows && len >= rows {
        start = end.saturating_sub(rows);
    }
    (start, end)
}

/// Coalesces fuzzy match indices into `(start, end)` character ranges.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

fn truncate_start(text: &str, max: usize) -> String {
    let len = text.chars().count();
    if len <= max {
        return text.to_string();
    }
    if max <= 3 {
        return String::new();
    }
    let tail: String = text.chars().skip(len - (max - 3)).collect();
    format!("...{tail}")
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

fn hex_line(offset: usize, chunk: &[u8]) -> String {
    let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
    let ascii: String = chunk
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
        .collect();
    format!("{offset:08x}  {:<47}  {ascii}", hex.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryKind;
    use crate::layout::Direction;

    fn state() -> AppState {
        AppState::new(
            WorkspaceSettings::default(),
            ControlSettings::default(),
            Theme::default(),
        )
    }

    #[test]
    fn new_state_has_ready_hint_and_one_empty_pane() {
        let state = state();
        assert_eq!(state.hint, READY_HINT);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.panes.len(), 1);
        assert!(vm.panes[0].focused);
        assert!(matches!(vm.panes[0].body, PaneBody::Empty(_)));
        assert_eq!(vm.status.mode, "NORMAL");
        assert_eq!(vm.status.row, 23);
    }

    #[test]
    fn panes_leave_room_for_status_bar() {
        let mut state = state();
        state.workspace.split_focused(Direction::Horizontal).expect("split");
        let vm = state.compute_viewmodel(21, 80);
        let bottom = vm
            .panes
            .iter()
            .map(|p| p.rect.y + p.rect.height)
            .max()
            .expect("panes");
        assert_eq!(bottom, 20);
    }

    #[test]
    fn visible_window_keeps_cursor_in_view() {
        assert_eq!(visible_window(0, 5, 10), (0, 5));
        assert_eq!(visible_window(50, 100, 10), (45, 55));
        assert_eq!(visible_window(99, 100, 10), (90, 100));
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(compute_highlight_ranges("foo.txt", "foo", &matcher), vec![(0, 3)]);
        assert!(compute_highlight_ranges("bar", "zzz", &matcher).is_empty());
    }

    #[test]
    fn search_hits_show_parent_directory() {
        let entry = Entry::search_hit("/a/b/foo.txt", EntryKind::File);
        let item = AppState::compute_display_item(&entry, true, None, 80);
        assert_eq!(item.name, "foo.txt");
        assert_eq!(item.detail, "/a/b");
        assert!(item.is_selected);
    }

    #[test]
    fn hex_lines_have_offset_and_ascii() {
        let line = hex_line(16, b"AB\x00");
        assert!(line.starts_with("00000010  41 42 00"));
        assert!(line.ends_with("AB."));
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn truncate_start_keeps_tail() {
        assert_eq!(truncate_start("/very/long/path", 8), ".../path");
        assert_eq!(truncate_start("/a", 8), "/a");
    }
}
