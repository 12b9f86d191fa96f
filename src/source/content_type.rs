//! Content types guessed from file extensions.

/// Returns the MIME content type for a path based on its extension.
///
/// ```
/// use zexplorer::source::content_type_for;
///
/// assert_eq!(content_type_for("/docs/guide.pdf"), "application/pdf");
/// assert_eq!(content_type_for("/notes/todo.txt"), "text/plain; charset=utf-8");
/// assert_eq!(content_type_for("/bin/tool"), "application/octet-stream");
/// ```
#[must_use]
pub fn content_type_for(path: &str) -> &'static str {
    let name = crate::infrastructure::paths::basename(path);
    let extension = name
        .rsplit_once('.')
        .filter(|(stem, _)| !stem.is_empty())
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt" | "log") => "text/plain; charset=utf-8",
        Some("md" | "markdown") => "text/markdown; charset=utf-8",
        Some("json") => "application/json",
        Some("xml" | "svg") => "application/xml",
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("csv") => "text/csv; charset=utf-8",
        Some(
            "rs" | "toml" | "yaml" | "yml" | "kdl" | "ini" | "cfg" | "conf" | "sh" | "bash"
            | "zsh" | "fish" | "py" | "js" | "ts" | "go" | "c" | "h" | "cpp" | "hpp" | "java"
            | "rb" | "lua" | "sql",
        ) => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(content_type_for("/REPORT.PDF"), "application/pdf");
        assert_eq!(content_type_for("Cargo.TOML"), "text/plain; charset=utf-8");
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(content_type_for("/home/.bashrc"), "application/octet-stream");
    }

    #[test]
    fn structured_text_types() {
        assert_eq!(content_type_for("data.json"), "application/json");
        assert_eq!(content_type_for("feed.xml"), "application/xml");
        assert_eq!(content_type_for("README.md"), "text/markdown; charset=utf-8");
    }
}
