//! Filesystem access used by the background worker.
//!
//! - [`backend`]: The [`FileSource`] trait and its result types
//! - [`local`]: `std::fs` implementation
//! - [`content_type`]: Extension-based content type detection

pub mod backend;
pub mod content_type;
pub mod local;

pub use backend::{FetchedFile, FileSource, SearchMatch};
pub use content_type::content_type_for;
pub use local::LocalFileSource;
