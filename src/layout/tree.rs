//! Binary split tree describing how the plugin area is divided into panes.
//!
//! Every internal node splits its area between two children according to a
//! pair of weights; every leaf names one window. The tree owns its children
//! outright, so there are no parent links: operations that need ancestors
//! first compute a root-to-leaf [`LeafPath`] and walk it again.
//!
//! # Invariants
//!
//! - The tree always contains at least one leaf.
//! - Leaf window ids are pairwise distinct.
//! - Weights stay inside `[MIN_WEIGHT, MAX_WEIGHT]`.

use super::rect::{Layout, Rect, Separator};
use crate::windows::WindowId;
use std::fmt;
use thiserror::Error;

/// Smallest weight a split side can shrink to.
pub const MIN_WEIGHT: f64 = 0.25;

/// Largest weight a split side can grow to.
pub const MAX_WEIGHT: f64 = 8.0;

/// Orientation of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Children sit side by side (left | right).
    Vertical,
    /// Children are stacked (top / bottom).
    Horizontal,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// Which child of a split a path step descends into.
///
/// For horizontal splits `Left` is the top child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Root-to-leaf sequence of steps.
pub type LeafPath = Vec<Side>;

/// Rejected structural operations.
///
/// The display strings are user-facing and shown as status hints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Internal: couldn't find window {0} in tree.")]
    NotFound(WindowId),

    #[error("Cannot close the last window.")]
    LastWindow,

    #[error("No {0} split to resize near focused window.")]
    NoSplitToResize(Direction),
}

/// An internal node: two children sharing an area.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub direction: Direction,
    pub left: SplitNode,
    pub right: SplitNode,
    pub weight_left: f64,
    pub weight_right: f64,
}

impl Split {
    fn child(&self, side: Side) -> &SplitNode {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut SplitNode {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Moves `delta` of weight toward `side`, clamping each side on its own.
    fn shift_weight(&mut self, side: Side, delta: f64) {
        let (grow, shrink) = match side {
            Side::Left => (&mut self.weight_left, &mut self.weight_right),
            Side::Right => (&mut self.weight_right, &mut self.weight_left),
        };
        *grow = clamp_weight(*grow + delta);
        *shrink = clamp_weight(*shrink - delta);
    }
}

/// A node of the split tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitNode {
    Leaf { window: WindowId },
    Split(Box<Split>),
}

impl SplitNode {
    #[must_use]
    pub const fn leaf(window: WindowId) -> Self {
        Self::Leaf { window }
    }

    fn collect_into(&self, out: &mut Vec<WindowId>) {
        match self {
            Self::Leaf { window } => out.push(*window),
            Self::Split(split) => {
                split.left.collect_into(out);
                split.right.collect_into(out);
            }
        }
    }

    fn path_to(&self, target: WindowId, path: &mut LeafPath) -> bool {
        match self {
            Self::Leaf { window } => *window == target,
            Self::Split(split) => {
                for side in [Side::Left, Side::Right] {
                    path.push(side);
                    if split.child(side).path_to(target, path) {
                        return true;
                    }
                    path.pop();
                }
                false
            }
        }
    }

    fn layout_into(&self, area: Rect, out: &mut Layout) {
        match self {
            Self::Leaf { window } => out.panes.push((*window, area)),
            Self::Split(split) => match split.direction {
                Direction::Vertical if area.width >= 3 => {
                    let (left, right) =
                        partition(area.width - 1, split.weight_left, split.weight_right);
                    split
                        .left
                        .layout_into(Rect::new(area.x, area.y, left, area.height), out);
                    out.separators.push(Separator {
                        x: area.x + left,
                        y: area.y,
                        height: area.height,
                    });
                    split.right.layout_into(
                        Rect::new(area.x + left + 1, area.y, right, area.height),
                        out,
                    );
                }
                Direction::Vertical => {
                    let (left, right) = partition(area.width, split.weight_left, split.weight_right);
                    split
                        .left
                        .layout_into(Rect::new(area.x, area.y, left, area.height), out);
                    split
                        .right
                        .layout_into(Rect::new(area.x + left, area.y, right, area.height), out);
                }
                Direction::Horizontal => {
                    let (top, bottom) =
                        partition(area.height, split.weight_left, split.weight_right);
                    split
                        .left
                        .layout_into(Rect::new(area.x, area.y, area.width, top), out);
                    split.right.layout_into(
                        Rect::new(area.x, area.y + top, area.width, bottom),
                        out,
                    );
                }
            },
        }
    }
}

/// Clamps a weight into `[MIN_WEIGHT, MAX_WEIGHT]`.
#[must_use]
pub fn clamp_weight(weight: f64) -> f64 {
    weight.clamp(MIN_WEIGHT, MAX_WEIGHT)
}

/// Splits `total` cells proportionally, giving each side at least one cell
/// whenever `total >= 2`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn partition(total: usize, weight_a: f64, weight_b: f64) -> (usize, usize) {
    if total < 2 {
        return (total, 0);
    }
    let share = weight_a / (weight_a + weight_b);
    let first = ((total as f64) * share).round() as usize;
    let first = first.clamp(1, total - 1);
    (first, total - first)
}

/// The pane layout of the plugin area.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitTree {
    root: SplitNode,
}

impl SplitTree {
    /// Creates a tree holding a single window.
    #[must_use]
    pub const fn new(window: WindowId) -> Self {
        Self {
            root: SplitNode::leaf(window),
        }
    }

    #[must_use]
    pub const fn root(&self) -> &SplitNode {
        &self.root
    }

    /// Window ids of all leaves, depth-first and left to right.
    #[must_use]
    pub fn collect_leaves(&self) -> Vec<WindowId> {
        let mut out = Vec::new();
        self.root.collect_into(&mut out);
        out
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.collect_leaves().len()
    }

    #[must_use]
    pub fn first_leaf(&self) -> WindowId {
        let mut node = &self.root;
        loop {
            match node {
                SplitNode::Leaf { window } => return *window,
                SplitNode::Split(split) => node = &split.left,
            }
        }
    }

    #[must_use]
    pub fn contains(&self, window: WindowId) -> bool {
        self.find_path(window).is_some()
    }

    /// Returns the steps from the root to the leaf holding `window`.
    #[must_use]
    pub fn find_path(&self, window: WindowId) -> Option<LeafPath> {
        let mut path = Vec::new();
        self.root.path_to(window, &mut path).then_some(path)
    }

    /// Returns the node reached by following `path`, if every step exists.
    #[must_use]
    pub fn node_at(&self, path: &[Side]) -> Option<&SplitNode> {
        path.iter().try_fold(&self.root, |node, side| match node {
            SplitNode::Split(split) => Some(split.child(*side)),
            SplitNode::Leaf { .. } => None,
        })
    }

    fn node_at_mut(&mut self, path: &[Side]) -> Option<&mut SplitNode> {
        path.iter().try_fold(&mut self.root, |node, side| match node {
            SplitNode::Split(split) => Some(split.child_mut(*side)),
            SplitNode::Leaf { .. } => None,
        })
    }

    /// Nodes along `path`, starting with the root and ending with the node
    /// the full path reaches.
    #[must_use]
    pub fn ancestors(&self, path: &[Side]) -> Vec<&SplitNode> {
        (0..=path.len())
            .map_while(|depth| self.node_at(&path[..depth]))
            .collect()
    }

    /// Replaces the leaf holding `target` with a split whose left child is the
    /// original leaf and whose right child is a new leaf for `new_window`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] when `target` is not a leaf of the tree;
    /// the tree is left unchanged.
    pub fn split(
        &mut self,
        target: WindowId,
        direction: Direction,
        new_window: WindowId,
    ) -> Result<(), TreeError> {
        let _span = tracing::debug_span!("tree_split", target, new_window, %direction).entered();

        let path = self.find_path(target).ok_or(TreeError::NotFound(target))?;
        let node = self
            .node_at_mut(&path)
            .ok_or(TreeError::NotFound(target))?;

        let original = std::mem::replace(node, SplitNode::leaf(new_window));
        *node = SplitNode::Split(Box::new(Split {
            direction,
            left: original,
            right: SplitNode::leaf(new_window),
            weight_left: 1.0,
            weight_right: 1.0,
        }));

        tracing::debug!(leaves = self.leaf_count(), "leaf split");
        Ok(())
    }

    /// Removes the leaf holding `target`; its sibling subtree takes the place
    /// of their parent split.
    ///
    /// # Errors
    ///
    /// - [`TreeError::LastWindow`] when the tree has a single leaf
    /// - [`TreeError::NotFound`] when `target` is not a leaf of the tree
    ///
    /// The tree is left unchanged on error.
    pub fn remove(&mut self, target: WindowId) -> Result<(), TreeError> {
        let _span = tracing::debug_span!("tree_remove", target).entered();

        if self.leaf_count() <= 1 {
            return Err(TreeError::LastWindow);
        }

        let mut path = self.find_path(target).ok_or(TreeError::NotFound(target))?;
        // With two or more leaves every leaf sits below a split.
        let Some(side) = path.pop() else {
            return Err(TreeError::NotFound(target));
        };
        let parent = self
            .node_at_mut(&path)
            .ok_or(TreeError::NotFound(target))?;

        let taken = std::mem::replace(parent, SplitNode::leaf(target));
        match taken {
            SplitNode::Split(split) => {
                let Split { left, right, .. } = *split;
                *parent = match side {
                    Side::Left => right,
                    Side::Right => left,
                };
                Ok(())
            }
            leaf @ SplitNode::Leaf { .. } => {
                *parent = leaf;
                Err(TreeError::NotFound(target))
            }
        }
    }

    /// Shifts weight toward the side containing `target` at the nearest
    /// ancestor split with the given direction.
    ///
    /// The side containing the leaf gains `delta` and its sibling loses it;
    /// both are clamped independently, so the pair's sum is not preserved at
    /// the bounds.
    ///
    /// # Errors
    ///
    /// - [`TreeError::NotFound`] when `target` is not a leaf of the tree
    /// - [`TreeError::NoSplitToResize`] when no ancestor split matches
    pub fn resize(
        &mut self,
        target: WindowId,
        direction: Direction,
        delta: f64,
    ) -> Result<(), TreeError> {
        let _span = tracing::debug_span!("tree_resize", target, %direction, delta).entered();

        let path = self.find_path(target).ok_or(TreeError::NotFound(target))?;

        for depth in (0..path.len()).rev() {
            if let Some(SplitNode::Split(split)) = self.node_at_mut(&path[..depth]) {
                if split.direction == direction {
                    split.shift_weight(path[depth], delta);
                    tracing::debug!(
                        weight_left = split.weight_left,
                        weight_right = split.weight_right,
                        "split resized"
                    );
                    return Ok(());
                }
            }
        }

        Err(TreeError::NoSplitToResize(direction))
    }

    /// Converts weights into integer cell rectangles covering `area`.
    #[must_use]
    pub fn layout(&self, area: Rect) -> Layout {
        let mut out = Layout::default();
        self.root.layout_into(area, &mut out);
        out
    }
}
