//! Content type identifiers.

use std::fmt;

/// Trac wiki markup.
pub const TRAC_WIKI: &str = "text/x-trac-wiki";
/// Markdown, as forced for `*.md` files.
pub const X_MARKDOWN: &str = "text/x-markdown";
/// Plain text fallback.
pub const PLAIN_TEXT: &str = "text/plain";
/// Generic "unknown binary" placeholder.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Media types accepted as markdown.
///
/// See draft-ietf-appsawg-text-markdown and draft-seantek-text-markdown-media-type.
pub const MARKDOWN_TYPES: [&str; 4] = [
    "text/markdown",
    "text/x-markdown",
    "text/x-web-markdown",
    "text/vnd.daringfireball.markdown",
];

/// Logical classification of a byte stream, e.g. `text/markdown`.
///
/// Parameters such as `; charset=utf-8` are kept in the string but ignored by
/// [`ContentType::essence`] and [`ContentType::is`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType(String);

impl ContentType {
    /// Create a content type from its string form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Full string form, including parameters.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type without parameters, e.g. `text/plain` for `text/plain; charset=utf-8`.
    #[must_use]
    pub fn essence(&self) -> &str {
        self.0.split(';').next().unwrap_or_default().trim()
    }

    /// Case-insensitive comparison of the essence with `other`.
    #[must_use]
    pub fn is(&self, other: &str) -> bool {
        self.essence().eq_ignore_ascii_case(other)
    }

    /// Whether this is one of [`MARKDOWN_TYPES`].
    #[must_use]
    pub fn is_markdown(&self) -> bool {
        MARKDOWN_TYPES.iter().any(|t| self.is(t))
    }

    /// Whether the top-level type is `text`.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.essence()
            .split_once('/')
            .is_some_and(|(top, _)| top.eq_ignore_ascii_case("text"))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
