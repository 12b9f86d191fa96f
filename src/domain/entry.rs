//! Directory entries and listing order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Kind of a filesystem entry as reported by a file source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A directory that can be descended into.
    Dir,
    /// Anything else; opened in a viewer.
    File,
}

impl EntryKind {
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Dir)
    }
}

/// One row of an explorer buffer.
///
/// `full_path` is only set for recursive search results, whose names are not
/// relative to the explorer's working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_path: Option<String>,
}

impl Entry {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            full_path: None,
        }
    }

    /// Builds an entry for a search hit located at `path`.
    #[must_use]
    pub fn search_hit(path: &str, kind: EntryKind) -> Self {
        Self {
            name: crate::infrastructure::paths::basename(path).to_string(),
            kind,
            full_path: Some(path.to_string()),
        }
    }
}

/// Compares two names the way a locale-aware collation would for plain text:
/// letters compare case-insensitively, and on a case-only difference the
/// lowercase spelling sorts first.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find_map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Some(Ordering::Less),
                (false, true) => Some(Ordering::Greater),
                _ => None,
            })
            .unwrap_or(Ordering::Equal)
    })
}

/// Sorts a directory listing in place: directories first, then by name.
///
/// The sort is stable, so entries that compare equal keep their input order.
pub fn sort_listing(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.kind
            .is_dir()
            .cmp(&a.kind.is_dir())
            .then_with(|| compare_names(&a.name, &b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn directories_come_before_files() {
        let mut entries = vec![
            Entry::new("a.txt", EntryKind::File),
            Entry::new("zeta", EntryKind::Dir),
            Entry::new("b.txt", EntryKind::File),
            Entry::new("alpha", EntryKind::Dir),
        ];
        sort_listing(&mut entries);
        assert_eq!(names(&entries), vec!["alpha", "zeta", "a.txt", "b.txt"]);
    }

    #[test]
    fn names_compare_case_insensitively() {
        let mut entries = vec![
            Entry::new("Makefile", EntryKind::File),
            Entry::new("build.rs", EntryKind::File),
            Entry::new("README.md", EntryKind::File),
            Entry::new("cargo.toml", EntryKind::File),
        ];
        sort_listing(&mut entries);
        assert_eq!(
            names(&entries),
            vec!["build.rs", "cargo.toml", "Makefile", "README.md"]
        );
    }

    #[test]
    fn lowercase_wins_case_only_ties() {
        assert_eq!(compare_names("readme", "README"), Ordering::Less);
        assert_eq!(compare_names("Readme", "readme"), Ordering::Greater);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn order_is_independent_of_input_permutation() {
        let base = vec![
            Entry::new("src", EntryKind::Dir),
            Entry::new("Cargo.toml", EntryKind::File),
            Entry::new("docs", EntryKind::Dir),
            Entry::new("LICENSE", EntryKind::File),
            Entry::new("build.rs", EntryKind::File),
        ];

        let mut expected = base.clone();
        sort_listing(&mut expected);

        for rotation in 0..base.len() {
            let mut permuted = base.clone();
            permuted.rotate_left(rotation);
            permuted.reverse();
            sort_listing(&mut permuted);
            assert_eq!(permuted, expected);
        }
    }

    #[test]
    fn search_hit_uses_basename() {
        let entry = Entry::search_hit("/a/b/foo.txt", EntryKind::File);
        assert_eq!(entry.name, "foo.txt");
        assert_eq!(entry.full_path.as_deref(), Some("/a/b/foo.txt"));
    }
}
