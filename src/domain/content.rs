//! Classification of fetched file contents by MIME type.

/// How a viewer presents fetched bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    /// Page-oriented documents (PDF); zoomable, held as a binary resource.
    Paginated,
    /// Anything decodable as text.
    Text,
    /// Opaque bytes, held as a binary resource.
    Binary,
}

impl ContentClass {
    /// Classifies a content type string such as `text/plain; charset=utf-8`.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Self {
        let lowered = content_type.to_ascii_lowercase();
        if lowered.contains("application/pdf") {
            Self::Paginated
        } else if lowered.starts_with("text/") || lowered.contains("json") || lowered.contains("xml") {
            Self::Text
        } else {
            Self::Binary
        }
    }
}

/// Counts PDF page objects in a byte buffer.
///
/// Matches `/Type /Page` and `/Type/Page` markers while skipping `/Pages`
/// tree nodes. Truncated previews may under-count.
#[must_use]
pub fn count_pdf_pages(bytes: &[u8]) -> usize {
    const MARKERS: [&[u8]; 2] = [b"/Type /Page", b"/Type/Page"];

    MARKERS
        .iter()
        .map(|marker| {
            bytes
                .windows(marker.len())
                .enumerate()
                .filter(|(_, w)| w == marker)
                .filter(|(i, _)| bytes.get(i + marker.len()) != Some(&b's'))
                .count()
        })
        .sum()
}
