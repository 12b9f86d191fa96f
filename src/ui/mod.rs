//! Terminal rendering of the pane workspace.
//!
//! - [`viewmodel`]: Display-ready pane, row and status bar types
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Pane, explorer, viewer and status bar renderers
//! - [`helpers`]: Cursor positioning, width fitting, match highlighting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, PaneBody, PaneTitle, PaneView, PromptInfo, StatusBar, UIViewModel,
};
