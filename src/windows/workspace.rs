//! The split tree, window registry and focus, owned together.

use super::focus::FocusController;
use super::registry::WindowRegistry;
use super::window::{Window, WindowId};
use crate::layout::{Direction, Layout, Rect, SplitTree, TreeError};

/// Settings the lifecycle needs when issuing requests.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceSettings {
    /// Directory a fresh explorer starts in.
    pub default_path: String,
    /// Maximum number of recursive search hits.
    pub search_limit: usize,
    /// Maximum number of bytes fetched for a preview.
    pub preview_bytes: u64,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            default_path: "/host".to_string(),
            search_limit: 200,
            preview_bytes: 256 * 1024,
        }
    }
}

/// All pane state of the plugin.
///
/// Every leaf of `tree` is registered in `registry`, and the focused id is
/// always one of the leaves.
#[derive(Debug)]
pub struct Workspace {
    pub(crate) tree: SplitTree,
    pub(crate) registry: WindowRegistry,
    pub(crate) focus: FocusController,
    pub(crate) settings: WorkspaceSettings,
}

impl Workspace {
    /// Creates a workspace with one empty, focused window.
    #[must_use]
    pub fn new(settings: WorkspaceSettings) -> Self {
        let mut registry = WindowRegistry::new();
        let mut focus = FocusController::new();
        let first = registry.create();
        focus.on_window_created(first);

        Self {
            tree: SplitTree::new(first),
            registry,
            focus,
            settings,
        }
    }

    #[must_use]
    pub const fn tree(&self) -> &SplitTree {
        &self.tree
    }

    #[must_use]
    pub const fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn settings(&self) -> &WorkspaceSettings {
        &self.settings
    }

    /// The focused window id.
    #[must_use]
    pub fn focused_id(&self) -> WindowId {
        self.focus
            .focused()
            .unwrap_or_else(|| self.tree.first_leaf())
    }

    #[must_use]
    pub fn focused_window(&self) -> Option<&Window> {
        self.registry.get(self.focused_id())
    }

    pub fn focused_window_mut(&mut self) -> Option<&mut Window> {
        let id = self.focused_id();
        self.registry.get_mut(id)
    }

    #[must_use]
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.registry.get(id)
    }

    /// Splits the focused window, returning the id of the new empty window.
    /// Focus stays on the original window.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if the focused window is not in the
    /// tree; no window is created in that case.
    pub fn split_focused(&mut self, direction: Direction) -> Result<WindowId, TreeError> {
        let target = self.focused_id();
        if !self.tree.contains(target) {
            return Err(TreeError::NotFound(target));
        }

        let new_window = self.registry.create();
        if let Err(e) = self.tree.split(target, direction, new_window) {
            self.registry.remove(new_window);
            return Err(e);
        }
        self.focus.on_window_created(new_window);
        Ok(new_window)
    }

    /// Closes the focused window and returns its id.
    ///
    /// # Errors
    ///
    /// - [`TreeError::LastWindow`] when it is the only window
    /// - [`TreeError::NotFound`] when it is missing from the tree
    pub fn close_focused(&mut self) -> Result<WindowId, TreeError> {
        let target = self.focused_id();
        self.close(target)?;
        Ok(target)
    }

    /// Closes a window: removes its leaf, releases its payload and moves focus
    /// to the first remaining leaf.
    ///
    /// # Errors
    ///
    /// Same as [`SplitTree::remove`]; nothing changes on error.
    pub fn close(&mut self, id: WindowId) -> Result<(), TreeError> {
        self.tree.remove(id)?;
        self.registry.remove(id);
        self.focus.after_removal(&self.tree);
        Ok(())
    }

    /// Resizes the nearest split of `direction` around the focused window.
    ///
    /// # Errors
    ///
    /// Same as [`SplitTree::resize`].
    pub fn resize_focused(&mut self, direction: Direction, delta: f64) -> Result<(), TreeError> {
        let target = self.focused_id();
        self.tree.resize(target, direction, delta)
    }

    /// Focuses `id` if it exists. Returns whether focus moved.
    pub fn focus_window(&mut self, id: WindowId) -> bool {
        self.focus.request(id, &self.registry, &self.tree)
    }

    #[must_use]
    pub fn layout(&self, area: Rect) -> Layout {
        self.tree.layout(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_focused_empty_window() {
        let workspace = Workspace::new(WorkspaceSettings::default());
        assert_eq!(workspace.tree().collect_leaves(), vec![1]);
        assert_eq!(workspace.focused_id(), 1);
        assert_eq!(workspace.registry().len(), 1);
    }

    #[test]
    fn split_keeps_focus_and_registers_window() {
        let mut workspace = Workspace::new(WorkspaceSettings::default());
        let new_window = workspace.split_focused(Direction::Vertical).expect("split");
        assert_eq!(new_window, 2);
        assert_eq!(workspace.focused_id(), 1);
        assert!(workspace.registry().contains(2));
    }

    #[test]
    fn close_moves_focus_to_first_leaf() {
        let mut workspace = Workspace::new(WorkspaceSettings::default());
        workspace.split_focused(Direction::Vertical).expect("split");
        workspace.split_focused(Direction::Horizontal).expect("split");
        assert!(workspace.focus_window(3));

        assert_eq!(workspace.close_focused(), Ok(3));
        assert_eq!(workspace.focused_id(), workspace.tree().collect_leaves()[0]);
        assert!(!workspace.registry().contains(3));
    }

    #[test]
    fn close_of_last_window_changes_nothing() {
        let mut workspace = Workspace::new(WorkspaceSettings::default());
        assert_eq!(workspace.close_focused(), Err(TreeError::LastWindow));
        assert_eq!(workspace.tree().collect_leaves(), vec![1]);
        assert!(workspace.registry().contains(1));
    }

    #[test]
    fn every_leaf_is_registered() {
        let mut workspace = Workspace::new(WorkspaceSettings::default());
        for step in 0..12 {
            if step % 4 == 3 {
                let _ = workspace.close_focused();
            } else {
                let direction = if step % 2 == 0 {
                    Direction::Vertical
                } else {
                    Direction::Horizontal
                };
                let created = workspace.split_focused(direction).expect("split");
                workspace.focus_window(created);
            }
            let leaves = workspace.tree().collect_leaves();
            assert_eq!(leaves.len(), workspace.registry().len());
            assert!(leaves.iter().all(|id| workspace.registry().contains(*id)));
            assert!(leaves.contains(&workspace.focused_id()));
        }
    }
}
