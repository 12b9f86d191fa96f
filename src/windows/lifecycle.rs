//! Buffer transitions of a window and application of worker results.
//!
//! Every request issued for a window bumps the window's generation and
//! carries the new value. A response whose window is gone or whose
//! generation is no longer current is discarded, so a slow listing cannot
//! overwrite a viewer the user opened in the meantime.
//!
//! ```text
//!   Empty ──open_explorer──▶ Explorer ──enter(file)──▶ Viewer
//!                              ▲  │                      │
//!                              │  └──enter(dir) / up──┐  │
//!                              └──────────────────────┘  │
//!                              ▲                         │
//!                              └─────────back────────────┘
//! ```

use super::resources::BinaryResource;
use super::window::{Buffer, ExplorerBuffer, ViewerBuffer, WindowId};
use super::workspace::Workspace;
use crate::domain::content::count_pdf_pages;
use crate::domain::{sort_listing, ContentClass, Entry, EntryKind};
use crate::infrastructure::paths::{join_path, parent_path};
use crate::worker::{RequestKind, WorkerMessage, WorkerResponse};

/// Bytes per row when binary content is shown as a hex dump.
pub const HEX_ROW_BYTES: usize = 16;

/// What the controller should do after a lifecycle step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effect {
    /// Request to post to the worker.
    pub request: Option<WorkerMessage>,
    /// New status hint.
    pub hint: Option<String>,
}

impl Effect {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            request: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn hint(hint: impl Into<String>) -> Self {
        Self {
            request: None,
            hint: Some(hint.into()),
        }
    }

    fn request(request: WorkerMessage) -> Self {
        Self {
            request: Some(request),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Workspace {
    /// Ensures window `id` shows an explorer.
    ///
    /// An explorer that already has entries, or is loading, is left alone.
    /// Any other window becomes an explorer at the default directory and
    /// starts loading it.
    pub fn open_explorer(&mut self, id: WindowId) -> Effect {
        let Some(window) = self.registry.get(id) else {
            return Effect::none();
        };

        let cwd = match &window.buffer {
            Buffer::Explorer(explorer) if explorer.loading || !explorer.entries.is_empty() => {
                return Effect::none();
            }
            Buffer::Explorer(explorer) => explorer.cwd.clone(),
            Buffer::Empty | Buffer::Viewer(_) => {
                let cwd = self.settings.default_path.clone();
                self.registry
                    .replace_buffer(id, Buffer::Explorer(ExplorerBuffer::new(cwd.clone())));
                cwd
            }
        };

        self.load_listing(id, &cwd)
    }

    /// Marks the explorer in `id` as loading `path` and requests the listing.
    pub fn load_listing(&mut self, id: WindowId, path: &str) -> Effect {
        let Some(generation) = self.registry.bump_generation(id) else {
            return Effect::none();
        };
        let Some(explorer) = self.registry.get_mut(id).and_then(|w| w.explorer_mut()) else {
            return Effect::none();
        };

        explorer.cwd = path.to_string();
        explorer.loading = true;
        explorer.error = None;

        tracing::debug!(window = id, generation, path = %path, "listing requested");
        Effect::request(WorkerMessage::list_directory(id, generation, path.to_string()))
    }

    /// Makes `id` a viewer of `path` and requests the file.
    ///
    /// Any resource held by the previous buffer is released.
    pub fn open_viewer(&mut self, id: WindowId, path: &str) -> Effect {
        if !self
            .registry
            .replace_buffer(id, Buffer::Viewer(ViewerBuffer::new(path)))
        {
            return Effect::none();
        }
        let Some(generation) = self.registry.get(id).map(|w| w.generation) else {
            return Effect::none();
        };

        tracing::debug!(window = id, generation, path = %path, "file requested");
        Effect::request(WorkerMessage::fetch_file(
            id,
            generation,
            path.to_string(),
            self.settings.preview_bytes,
        ))
        .with_hint(format!("Opening {path}…"))
    }

    /// Turns a viewer back into an explorer at the parent of its file.
    pub fn viewer_back(&mut self, id: WindowId) -> Effect {
        let Some(path) = self
            .registry
            .get(id)
            .and_then(|w| w.viewer())
            .map(|v| v.path.clone())
        else {
            return Effect::none();
        };

        let parent = parent_path(&path);
        self.registry
            .replace_buffer(id, Buffer::Explorer(ExplorerBuffer::new(parent.clone())));
        self.load_listing(id, &parent)
    }

    /// Goes up one level: an explorer lists its parent directory, a viewer
    /// returns to the explorer of its directory.
    pub fn navigate_up(&mut self, id: WindowId) -> Effect {
        let Some(window) = self.registry.get(id) else {
            return Effect::none();
        };
        match &window.buffer {
            Buffer::Explorer(explorer) => {
                let parent = parent_path(&explorer.cwd);
                self.load_listing(id, &parent)
            }
            Buffer::Viewer(_) => self.viewer_back(id),
            Buffer::Empty => Effect::none(),
        }
    }

    /// Opens the entry under the explorer cursor: directories are listed in
    /// place, files open in a viewer.
    pub fn explorer_enter(&mut self, id: WindowId) -> Effect {
        let Some(explorer) = self.registry.get(id).and_then(|w| w.explorer()) else {
            return Effect::none();
        };
        let Some(entry) = explorer.selected() else {
            return Effect::none();
        };

        let kind = entry.kind;
        let target = entry
            .full_path
            .clone()
            .unwrap_or_else(|| join_path(&explorer.cwd, &entry.name));

        match kind {
            EntryKind::Dir => {
                let effect = self.load_listing(id, &target);
                if let Some(explorer) = self.registry.get_mut(id).and_then(|w| w.explorer_mut()) {
                    explorer.search_query = None;
                }
                effect
            }
            EntryKind::File => self.open_viewer(id, &target),
        }
    }

    /// Starts a recursive search below the explorer's directory.
    pub fn submit_search(&mut self, id: WindowId, query: &str) -> Effect {
        let query = query.trim();
        if query.is_empty() {
            return Effect::hint("Empty search.");
        }
        let Some(cwd) = self
            .registry
            .get(id)
            .and_then(|w| w.explorer())
            .map(|e| e.cwd.clone())
        else {
            return Effect::hint("Search requires an explorer window.");
        };
        let Some(generation) = self.registry.bump_generation(id) else {
            return Effect::none();
        };
        if let Some(explorer) = self.registry.get_mut(id).and_then(|w| w.explorer_mut()) {
            explorer.loading = true;
            explorer.error = None;
        }

        tracing::debug!(window = id, generation, query = %query, base = %cwd, "search requested");
        Effect::request(WorkerMessage::search(
            id,
            generation,
            cwd.clone(),
            query.to_string(),
            self.settings.search_limit,
        ))
        .with_hint(format!("Searching {cwd} for '{query}'…"))
    }

    /// Applies a worker response to the window that requested it.
    ///
    /// Responses for removed windows or superseded generations are dropped
    /// and produce no effect.
    pub fn apply_response(&mut self, response: WorkerResponse) -> Effect {
        let (id, generation) = response.target();
        let current = self.registry.get(id).map(|w| w.generation);
        if current != Some(generation) {
            tracing::debug!(
                window = id,
                generation,
                current = ?current,
                "discarding stale response"
            );
            return Effect::none();
        }

        match response {
            WorkerResponse::Listing { path, entries, .. } => self.apply_listing(id, path, entries),
            WorkerResponse::SearchResults { query, matches, .. } => {
                let entries = matches
                    .iter()
                    .map(|hit| Entry::search_hit(&hit.path, hit.kind))
                    .collect();
                self.apply_search(id, &query, entries)
            }
            WorkerResponse::File {
                path,
                content_type,
                bytes,
                total_size,
                ..
            } => self.apply_file(id, &path, content_type, bytes, total_size),
            WorkerResponse::Failed { request, message, .. } => {
                self.apply_failure(id, request, &message)
            }
        }
    }

    fn apply_listing(&mut self, id: WindowId, path: String, mut entries: Vec<Entry>) -> Effect {
        let Some(explorer) = self.registry.get_mut(id).and_then(|w| w.explorer_mut()) else {
            return Effect::none();
        };

        sort_listing(&mut entries);
        explorer.entries = entries;
        explorer.clamp_cursor();
        explorer.loading = false;
        explorer.error = None;
        explorer.search_query = None;
        let hint = format!("Explorer loaded: {path}");
        explorer.cwd = path;

        Effect::hint(hint)
    }

    fn apply_search(&mut self, id: WindowId, query: &str, entries: Vec<Entry>) -> Effect {
        let Some(explorer) = self.registry.get_mut(id).and_then(|w| w.explorer_mut()) else {
            return Effect::none();
        };

        let count = entries.len();
        explorer.entries = entries;
        explorer.cursor = 0;
        explorer.loading = false;
        explorer.error = None;
        explorer.search_query = Some(query.to_string());

        Effect::hint(format!("Search: {count} matches for '{query}'."))
    }

    fn apply_file(
        &mut self,
        id: WindowId,
        path: &str,
        content_type: String,
        bytes: Vec<u8>,
        total_size: u64,
    ) -> Effect {
        let class = ContentClass::from_content_type(&content_type);
        let truncated = (bytes.len() as u64) < total_size;

        match class {
            ContentClass::Text => {
                let Some(viewer) = self.registry.get_mut(id).and_then(|w| w.viewer_mut()) else {
                    return Effect::none();
                };
                let text = String::from_utf8_lossy(&bytes).into_owned();
                viewer.line_count = text.lines().count().max(1);
                viewer.text = Some(text);
                viewer.content_type = Some(content_type);
                viewer.class = Some(class);
                viewer.truncated = truncated;
            }
            ContentClass::Paginated | ContentClass::Binary => {
                let page_count = (class == ContentClass::Paginated).then(|| count_pdf_pages(&bytes));
                let line_count = match page_count {
                    Some(pages) => pages.max(1),
                    None => bytes.len().div_ceil(HEX_ROW_BYTES).max(1),
                };
                let resource = BinaryResource {
                    content_type: content_type.clone(),
                    bytes,
                    total_size,
                    page_count,
                };
                if self.registry.attach_resource(id, resource).is_none() {
                    return Effect::none();
                }
                if let Some(viewer) = self.registry.get_mut(id).and_then(|w| w.viewer_mut()) {
                    viewer.content_type = Some(content_type);
                    viewer.class = Some(class);
                    viewer.line_count = line_count;
                    viewer.truncated = truncated;
                }
            }
        }

        Effect::hint(format!("Opened {path}"))
    }

    fn apply_failure(&mut self, id: WindowId, request: RequestKind, message: &str) -> Effect {
        let Some(window) = self.registry.get_mut(id) else {
            return Effect::none();
        };
        tracing::debug!(window = id, request = ?request, error = %message, "request failed");

        match &mut window.buffer {
            Buffer::Explorer(explorer) => {
                explorer.loading = false;
                explorer.error = Some(message.to_string());
                Effect::hint(format!("Explorer error: {message}"))
            }
            Buffer::Viewer(viewer) => {
                let text = format!("Failed to open file:\n{message}");
                viewer.line_count = text.lines().count();
                viewer.text = Some(text);
                viewer.content_type = Some("text/plain".to_string());
                viewer.class = Some(ContentClass::Text);
                Effect::hint(format!("Open failed: {message}"))
            }
            Buffer::Empty => Effect::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SearchMatch;
    use crate::windows::WorkspaceSettings;

    fn workspace() -> Workspace {
        Workspace::new(WorkspaceSettings {
            default_path: "/a".to_string(),
            search_limit: 50,
            preview_bytes: 1024,
        })
    }

    fn generation(workspace: &Workspace, id: WindowId) -> u64 {
        workspace.window(id).map(|w| w.generation).expect("window exists")
    }

    fn listing(workspace: &Workspace, id: WindowId, path: &str, entries: Vec<Entry>) -> WorkerResponse {
        WorkerResponse::Listing {
            window: id,
            generation: generation(workspace, id),
            path: path.to_string(),
            entries,
        }
    }

    #[test]
    fn open_explorer_converts_and_requests_listing() {
        let mut ws = workspace();
        let effect = ws.open_explorer(1);

        let Some(WorkerMessage::ListDirectory { window, path, generation: g, .. }) = effect.request else {
            panic!("expected a listing request");
        };
        assert_eq!((window, path.as_str()), (1, "/a"));
        assert_eq!(g, generation(&ws, 1));

        let explorer = ws.window(1).and_then(|w| w.explorer()).expect("explorer");
        assert!(explorer.loading);
        assert_eq!(explorer.cursor, 0);
        assert!(explorer.error.is_none());
    }

    #[test]
    fn open_explorer_is_idempotent_while_loading_or_loaded() {
        let mut ws = workspace();
        ws.open_explorer(1);
        assert_eq!(ws.open_explorer(1), Effect::none());

        let response = listing(&ws, 1, "/a", vec![Entry::new("x", EntryKind::File)]);
        ws.apply_response(response);
        assert_eq!(ws.open_explorer(1), Effect::none());
    }

    #[test]
    fn listing_is_sorted_and_cursor_clamped() {
        let mut ws = workspace();
        ws.open_explorer(1);
        if let Some(explorer) = ws.registry.get_mut(1).and_then(|w| w.explorer_mut()) {
            explorer.cursor = 9;
        }

        let response = listing(
            &ws,
            1,
            "/a",
            vec![
                Entry::new("z.txt", EntryKind::File),
                Entry::new("b", EntryKind::Dir),
                Entry::new("a.txt", EntryKind::File),
            ],
        );
        let effect = ws.apply_response(response);
        assert_eq!(effect.hint.as_deref(), Some("Explorer loaded: /a"));

        let explorer = ws.window(1).and_then(|w| w.explorer()).expect("explorer");
        let names: Vec<_> = explorer.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a.txt", "z.txt"]);
        assert_eq!(explorer.cursor, 2);
        assert!(!explorer.loading);
    }

    #[test]
    fn stale_listing_after_opening_viewer_is_ignored() {
        let mut ws = workspace();
        ws.open_explorer(1);
        let stale = listing(&ws, 1, "/a", vec![Entry::new("late", EntryKind::File)]);

        ws.open_viewer(1, "/a/readme.txt");
        assert_eq!(ws.apply_response(stale), Effect::none());

        let viewer = ws.window(1).and_then(|w| w.viewer()).expect("still a viewer");
        assert!(viewer.is_pending());
    }

    #[test]
    fn response_for_removed_window_is_ignored() {
        let mut ws = workspace();
        let second = ws.split_focused(crate::layout::Direction::Vertical).expect("split");
        ws.open_explorer(second);
        let response = listing(&ws, second, "/a", vec![]);

        ws.focus_window(second);
        ws.close_focused().expect("close");
        assert_eq!(ws.apply_response(response), Effect::none());
    }

    #[test]
    fn entering_directories_and_files() {
        let mut ws = workspace();
        ws.open_explorer(1);
        let response = listing(
            &ws,
            1,
            "/a",
            vec![Entry::new("b", EntryKind::Dir), Entry::new("c.txt", EntryKind::File)],
        );
        ws.apply_response(response);

        let effect = ws.explorer_enter(1);
        assert!(matches!(
            effect.request,
            Some(WorkerMessage::ListDirectory { ref path, .. }) if path == "/a/b"
        ));

        let response = listing(&ws, 1, "/a/b", vec![Entry::new("c.txt", EntryKind::File)]);
        ws.apply_response(response);
        let effect = ws.explorer_enter(1);
        assert!(matches!(
            effect.request,
            Some(WorkerMessage::FetchFile { ref path, max_bytes: 1024, .. }) if path == "/a/b/c.txt"
        ));
        assert_eq!(effect.hint.as_deref(), Some("Opening /a/b/c.txt…"));
    }

    #[test]
    fn search_results_replace_entries() {
        let mut ws = workspace();
        ws.open_explorer(1);
        let response = listing(&ws, 1, "/a", vec![Entry::new("b", EntryKind::Dir)]);
        ws.apply_response(response);

        let effect = ws.submit_search(1, "foo");
        let Some(WorkerMessage::Search { base, query, limit, generation: g, .. }) = effect.request else {
            panic!("expected a search request");
        };
        assert_eq!((base.as_str(), query.as_str(), limit), ("/a", "foo", 50));

        let effect = ws.apply_response(WorkerResponse::SearchResults {
            window: 1,
            generation: g,
            query: "foo".to_string(),
            matches: vec![SearchMatch {
                path: "/a/b/foo.txt".to_string(),
                kind: EntryKind::File,
            }],
        });
        assert_eq!(effect.hint.as_deref(), Some("Search: 1 matches for 'foo'."));

        let explorer = ws.window(1).and_then(|w| w.explorer()).expect("explorer");
        assert_eq!(
            explorer.entries,
            vec![Entry {
                name: "foo.txt".to_string(),
                kind: EntryKind::File,
                full_path: Some("/a/b/foo.txt".to_string()),
            }]
        );
        assert_eq!(explorer.cursor, 0);
        assert_eq!(explorer.search_query.as_deref(), Some("foo"));

        let effect = ws.explorer_enter(1);
        assert!(matches!(
            effect.request,
            Some(WorkerMessage::FetchFile { ref path, .. }) if path == "/a/b/foo.txt"
        ));
    }

    #[test]
    fn search_needs_an_explorer_and_a_query() {
        let mut ws = workspace();
        assert_eq!(
            ws.submit_search(1, "foo").hint.as_deref(),
            Some("Search requires an explorer window.")
        );
        ws.open_explorer(1);
        assert_eq!(ws.submit_search(1, "  ").hint.as_deref(), Some("Empty search."));
    }

    #[test]
    fn search_query_is_trimmed_before_sending() {
        let mut ws = workspace();
        ws.open_explorer(1);
        let response = listing(&ws, 1, "/a", vec![]);
        ws.apply_response(response);

        let effect = ws.submit_search(1, "  foo ");
        assert_eq!(effect.hint.as_deref(), Some("Searching /a for 'foo'…"));
        assert!(matches!(
            effect.request,
            Some(WorkerMessage::Search { ref query, .. }) if query == "foo"
        ));
    }

    #[test]
    fn text_file_is_decoded() {
        let mut ws = workspace();
        ws.open_viewer(1, "/a/notes.txt");
        let effect = ws.apply_response(WorkerResponse::File {
            window: 1,
            generation: generation(&ws, 1),
            path: "/a/notes.txt".to_string(),
            content_type: "text/plain; charset=utf-8".to_string(),
            bytes: b"one\ntwo\n".to_vec(),
            total_size: 8,
        });
        assert_eq!(effect.hint.as_deref(), Some("Opened /a/notes.txt"));

        let viewer = ws.window(1).and_then(|w| w.viewer()).expect("viewer");
        assert_eq!(viewer.text.as_deref(), Some("one\ntwo\n"));
        assert_eq!(viewer.line_count, 2);
        assert!(viewer.resource.is_none());
        assert_eq!(ws.registry().resources().live_count(), 0);
    }

    #[test]
    fn pdf_is_held_as_a_resource_and_released_on_back() {
        let mut ws = workspace();
        ws.open_viewer(1, "/a/doc.pdf");
        ws.apply_response(WorkerResponse::File {
            window: 1,
            generation: generation(&ws, 1),
            path: "/a/doc.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF /Type /Page /Type /Page".to_vec(),
            total_size: 4096,
        });

        let viewer = ws.window(1).and_then(|w| w.viewer()).expect("viewer");
        assert_eq!(viewer.class, Some(ContentClass::Paginated));
        assert!(viewer.truncated);
        let resource = viewer.resource.expect("resource");
        assert_eq!(
            ws.registry().resource(resource).and_then(|r| r.page_count),
            Some(2)
        );
        assert_eq!(ws.registry().resources().live_count(), 1);

        let effect = ws.navigate_up(1);
        assert!(matches!(
            effect.request,
            Some(WorkerMessage::ListDirectory { ref path, .. }) if path == "/a"
        ));
        assert_eq!(ws.registry().resources().live_count(), 0);
    }

    #[test]
    fn failed_fetch_shows_error_text() {
        let mut ws = workspace();
        ws.open_viewer(1, "/a/secret");
        let effect = ws.apply_response(WorkerResponse::Failed {
            window: 1,
            generation: generation(&ws, 1),
            request: RequestKind::File,
            message: "permission denied".to_string(),
        });
        assert_eq!(effect.hint.as_deref(), Some("Open failed: permission denied"));

        let viewer = ws.window(1).and_then(|w| w.viewer()).expect("viewer");
        assert_eq!(
            viewer.text.as_deref(),
            Some("Failed to open file:\npermission denied")
        );
        assert_eq!(viewer.content_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn failed_listing_sets_explorer_error() {
        let mut ws = workspace();
        ws.open_explorer(1);
        let effect = ws.apply_response(WorkerResponse::Failed {
            window: 1,
            generation: generation(&ws, 1),
            request: RequestKind::Listing,
            message: "cannot list /a".to_string(),
        });
        assert_eq!(effect.hint.as_deref(), Some("Explorer error: cannot list /a"));

        let explorer = ws.window(1).and_then(|w| w.explorer()).expect("explorer");
        assert!(!explorer.loading);
        assert_eq!(explorer.error.as_deref(), Some("cannot list /a"));

        assert!(ws.open_explorer(1).request.is_some());
    }

    #[test]
    fn explorer_up_from_root_stays_at_root() {
        let mut ws = workspace();
        ws.open_explorer(1);
        let response = listing(&ws, 1, "/", vec![]);
        ws.apply_response(response);
        let effect = ws.navigate_up(1);
        assert!(matches!(
            effect.request,
            Some(WorkerMessage::ListDirectory { ref path, .. }) if path == "/"
        ));
    }
}
