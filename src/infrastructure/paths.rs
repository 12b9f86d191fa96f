//! Path manipulation for the Zellij plugin sandbox.
//!
//! Explorer paths are plain `/`-separated strings. Inside the sandbox the host
//! filesystem is mounted under `/host` and the plugin's private data directory
//! under `/data`.

use std::path::PathBuf;

/// Mount point of the host filesystem inside the sandbox.
pub const HOST_ROOT: &str = "/host";

/// Returns the plugin's private data directory (trace files live here).
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Joins a directory path and an entry name with exactly one separator.
///
/// ```
/// use zexplorer::infrastructure::paths::join_path;
///
/// assert_eq!(join_path("/", "etc"), "/etc");
/// assert_eq!(join_path("/home/user", "notes.txt"), "/home/user/notes.txt");
/// assert_eq!(join_path("/home/user/", "notes.txt"), "/home/user/notes.txt");
/// ```
#[must_use]
pub fn join_path(dir: &str, name: &str) -> String {
    let name = name.trim_start_matches('/');
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Returns the parent directory of `path`. The parent of `/` is `/`.
///
/// ```
/// use zexplorer::infrastructure::paths::parent_path;
///
/// assert_eq!(parent_path("/"), "/");
/// assert_eq!(parent_path("/etc"), "/");
/// assert_eq!(parent_path("/a/b/c.txt"), "/a/b");
/// assert_eq!(parent_path("/a/b/"), "/a");
/// ```
#[must_use]
pub fn parent_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) if idx > 0 => trimmed[..idx].to_string(),
        _ => "/".to_string(),
    }
}

/// Returns the final component of `path`, ignoring a trailing separator.
#[must_use]
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Expands tilde paths to use the `/host` prefix.
///
/// ```
/// use zexplorer::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/projects"), "/host/projects");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        join_path(HOST_ROOT, rest)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Removes the `/host` prefix from sandbox paths for display.
///
/// `/host` itself becomes `/`; paths outside the mount are returned unchanged.
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix(HOST_ROOT) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

/// Converts a sandbox path into the host-relative form `open_file` expects.
///
/// Returns `None` for paths outside `/host`, which the host cannot resolve.
#[must_use]
pub fn host_relative(path: &str) -> Option<PathBuf> {
    let rest = path.strip_prefix(HOST_ROOT)?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }
    Some(PathBuf::from(rest.trim_start_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_of_top_level_entries_is_root() {
        assert_eq!(parent_path("/host"), "/");
        assert_eq!(parent_path("host"), "/");
        assert_eq!(parent_path(""), "/");
    }

    #[test]
    fn parent_then_join_round_trips_a_child() {
        let child = "/host/src/main.rs";
        assert_eq!(join_path(&parent_path(child), basename(child)), child);
    }

    #[test]
    fn basename_handles_trailing_separator() {
        assert_eq!(basename("/a/b/"), "b");
        assert_eq!(basename("foo.txt"), "foo.txt");
    }

    #[test]
    fn host_prefix_is_only_stripped_on_component_boundary() {
        assert_eq!(strip_host_prefix("/host/notes"), "/notes");
        assert_eq!(strip_host_prefix("/host"), "/");
        assert_eq!(strip_host_prefix("/hostile/x"), "/hostile/x");
    }

    #[test]
    fn host_relative_paths() {
        assert_eq!(host_relative("/host/a/b.txt"), Some(PathBuf::from("a/b.txt")));
        assert_eq!(host_relative("/host"), Some(PathBuf::new()));
        assert_eq!(host_relative("/etc/passwd"), None);
        assert_eq!(host_relative("/hostile"), None);
    }
}
