//! File source abstraction.
//!
//! The worker thread answers listing, fetch and search requests through a
//! [`FileSource`], so that the request handling can be exercised against a
//! temporary directory or an in-memory fake.

use crate::domain::error::Result;
use crate::domain::{Entry, EntryKind};
use serde::{Deserialize, Serialize};

/// Bytes read from a file, possibly truncated to the requested cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub total_size: u64,
}

/// A recursive search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Abstraction over the filesystem surface the explorer browses.
///
/// # Implementations
///
/// - [`LocalFileSource`](super::LocalFileSource): `std::fs` inside the plugin sandbox
///
/// # Examples
///
/// ```no_run
/// use zexplorer::source::{FileSource, LocalFileSource};
///
/// let source = LocalFileSource::new();
/// let entries = source.list("/host")?;
/// # Ok::<(), zexplorer::ExplorerError>(())
/// ```
pub trait FileSource: Send {
    /// Lists the direct children of a directory, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be read as a directory.
    fn list(&self, path: &str) -> Result<Vec<Entry>>;

    /// Reads up to `max_bytes` of a file and reports its content type.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn fetch(&self, path: &str, max_bytes: u64) -> Result<FetchedFile>;

    /// Finds entries below `base` whose names contain `query`
    /// case-insensitively, returning at most `limit` hits in traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty query or an unreadable `base`.
    fn search(&self, base: &str, query: &str, limit: usize) -> Result<Vec<SearchMatch>>;
}
