//! Domain layer for the zexplorer plugin.
//!
//! Core value types shared by the layout, window and worker layers, with no
//! dependency on Zellij APIs.
//!
//! - [`error`]: Error types and result aliases
//! - [`entry`]: Directory entries and listing order
//! - [`content`]: Content-type classification for viewers

pub mod content;
pub mod entry;
pub mod error;

pub use content::ContentClass;
pub use entry::{sort_listing, Entry, EntryKind};
pub use error::{ExplorerError, Result};
