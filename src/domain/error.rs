//! Error types for the zexplorer plugin.
//!
//! [`ExplorerError`] is the crate-wide error and [`Result`] its alias. Layout
//! failures keep their own [`TreeError`] so that their messages can be shown
//! verbatim in the status line.

use crate::layout::TreeError;
use thiserror::Error;

/// The main error type for zexplorer operations.
///
/// # Examples
///
/// ```
/// use zexplorer::domain::ExplorerError;
///
/// fn read_listing() -> Result<(), ExplorerError> {
///     Err(ExplorerError::Source("not a directory".to_string()))
/// }
///
/// assert!(read_listing().unwrap_err().to_string().contains("not a directory"));
/// ```
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// A file source could not satisfy a listing, fetch or search request.
    #[error("{0}")]
    Source(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Converts from `std::io::Error` through `#[from]`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    ///
    /// Covers (de)serialization of worker payloads in both directions.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A structural split-tree operation was rejected.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// A specialized `Result` type for zexplorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
