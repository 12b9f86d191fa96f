//! `std::fs` implementation of [`FileSource`].

use super::backend::{FetchedFile, FileSource, SearchMatch};
use super::content_type::content_type_for;
use crate::domain::error::{ExplorerError, Result};
use crate::domain::{Entry, EntryKind};
use crate::infrastructure::paths::join_path;
use std::fs;
use std::io::Read;
use std::path::Path;

/// One directory child as seen by [`LocalFileSource::read_children`].
struct Child {
    name: String,
    kind: EntryKind,
    is_link: bool,
}

/// Reads the filesystem visible to the plugin.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSource;

impl LocalFileSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads a directory's children sorted by name.
    ///
    /// `kind` follows symlinks so linked directories list as `Dir`;
    /// `is_link` records that the entry itself is a symlink.
    fn read_children(path: &str) -> std::io::Result<Vec<Child>> {
        let mut children: Vec<Child> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let is_link = entry.file_type().is_ok_and(|t| t.is_symlink());
                let kind = if entry.path().is_dir() {
                    EntryKind::Dir
                } else {
                    EntryKind::File
                };
                Child { name, kind, is_link }
            })
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    /// Depth-first search below `dir`. Hidden directories and symlinked
    /// directories are matched but not descended into.
    fn walk(dir: &str, needle: &str, limit: usize, out: &mut Vec<SearchMatch>) {
        let children = match Self::read_children(dir) {
            Ok(children) => children,
            Err(e) => {
                tracing::debug!(dir = %dir, error = %e, "skipping unreadable directory");
                return;
            }
        };

        for Child { name, kind, is_link } in children {
            if out.len() >= limit {
                return;
            }
            let path = join_path(dir, &name);
            if name.to_lowercase().contains(needle) {
                out.push(SearchMatch {
                    path: path.clone(),
                    kind,
                });
                if out.len() >= limit {
                    return;
                }
            }
            if kind.is_dir() && !is_link && !name.starts_with('.') {
                Self::walk(&path, needle, limit, out);
            }
        }
    }
}

impl FileSource for LocalFileSource {
    fn list(&self, path: &str) -> Result<Vec<Entry>> {
        let _span = tracing::debug_span!("local_list", path = %path).entered();

        let children = Self::read_children(path)
            .map_err(|e| ExplorerError::Source(format!("cannot list {path}: {e}")))?;

        tracing::debug!(count = children.len(), "directory listed");
        Ok(children
            .into_iter()
            .map(|child| Entry::new(child.name, child.kind))
            .collect())
    }

    fn fetch(&self, path: &str, max_bytes: u64) -> Result<FetchedFile> {
        let _span = tracing::debug_span!("local_fetch", path = %path, max_bytes).entered();

        let open_error = |e: std::io::Error| ExplorerError::Source(format!("cannot open {path}: {e}"));

        if Path::new(path).is_dir() {
            return Err(ExplorerError::Source(format!("{path} is a directory")));
        }

        let file = fs::File::open(path).map_err(open_error)?;
        let total_size = file.metadata().map_err(open_error)?.len();

        let mut bytes = Vec::new();
        file.take(max_bytes).read_to_end(&mut bytes)?;

        tracing::debug!(read = bytes.len(), total_size, "file fetched");
        Ok(FetchedFile {
            content_type: content_type_for(path).to_string(),
            bytes,
            total_size,
        })
    }

    fn search(&self, base: &str, query: &str, limit: usize) -> Result<Vec<SearchMatch>> {
        let _span = tracing::debug_span!("local_search", base = %base, query = %query, limit).entered();

        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(ExplorerError::Source("Missing search query".to_string()));
        }

        // The base must be readable; failures below it are skipped.
        fs::read_dir(base).map_err(|e| ExplorerError::Source(format!("cannot search {base}: {e}")))?;

        let mut out = Vec::new();
        Self::walk(base, &needle, limit, &mut out);

        tracing::debug!(matches = out.len(), "search complete");
        Ok(out)
    }
}
