//! Tracks which window receives keyboard input.

use super::registry::WindowRegistry;
use super::window::WindowId;
use crate::layout::SplitTree;

/// Holds the focused window id.
///
/// Whenever the tree is non-empty the focused id names one of its leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusController {
    focused: Option<WindowId>,
}

impl FocusController {
    #[must_use]
    pub const fn new() -> Self {
        Self { focused: None }
    }

    #[must_use]
    pub const fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Called after a window is created; focuses it only if nothing is
    /// focused yet. Splits therefore keep focus on the original window.
    pub fn on_window_created(&mut self, id: WindowId) {
        if self.focused.is_none() {
            self.focused = Some(id);
        }
    }

    /// Focuses `id` if it is a registered window shown in the tree.
    pub fn request(&mut self, id: WindowId, registry: &WindowRegistry, tree: &SplitTree) -> bool {
        if registry.contains(id) && tree.contains(id) {
            tracing::debug!(window = id, "focus moved");
            self.focused = Some(id);
            true
        } else {
            tracing::debug!(window = id, "focus request for unknown window ignored");
            false
        }
    }

    /// Called after a leaf was removed from the tree; focus moves to the
    /// first leaf.
    pub fn after_removal(&mut self, tree: &SplitTree) {
        self.focused = Some(tree.first_leaf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Direction;

    fn setup() -> (WindowRegistry, SplitTree, FocusController) {
        let mut registry = WindowRegistry::new();
        let mut focus = FocusController::new();
        let first = registry.create();
        focus.on_window_created(first);
        let tree = SplitTree::new(first);
        (registry, tree, focus)
    }

    #[test]
    fn first_window_takes_focus_and_later_ones_do_not() {
        let (mut registry, mut tree, mut focus) = setup();
        assert_eq!(focus.focused(), Some(1));

        let second = registry.create();
        tree.split(1, Direction::Vertical, second).expect("split");
        focus.on_window_created(second);
        assert_eq!(focus.focused(), Some(1));
    }

    #[test]
    fn request_requires_existing_window() {
        let (mut registry, mut tree, mut focus) = setup();
        let second = registry.create();
        tree.split(1, Direction::Horizontal, second).expect("split");

        assert!(focus.request(2, &registry, &tree));
        assert_eq!(focus.focused(), Some(2));
        assert!(!focus.request(5, &registry, &tree));
        assert_eq!(focus.focused(), Some(2));
    }

    #[test]
    fn removal_of_focused_window_moves_focus_to_first_leaf() {
        let (mut registry, mut tree, mut focus) = setup();
        let second = registry.create();
        tree.split(1, Direction::Vertical, second).expect("split");
        let third = registry.create();
        tree.split(second, Direction::Horizontal, third).expect("split");

        focus.request(third, &registry, &tree);
        tree.remove(third).expect("remove");
        registry.remove(third);
        focus.after_removal(&tree);
        assert_eq!(focus.focused(), Some(tree.collect_leaves()[0]));
    }
}
