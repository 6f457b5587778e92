//! Content type resolution for README candidates.

use std::sync::Arc;

use crate::content_type::{ContentType, OCTET_STREAM, PLAIN_TEXT, TRAC_WIKI, X_MARKDOWN};
use crate::sniff::{ContentSniffer, DefaultSniffer};

/// Number of leading bytes handed to the sniffer.
pub const DEFAULT_SNIFF_BYTES: usize = 4096;

/// Markup family of a README, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// `*.wiki`
    Wiki,
    /// `*.md`
    Markdown,
    /// Anything else.
    Other,
}

impl Flavor {
    /// Flavor implied by a file name. Extensions match case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) if ext.eq_ignore_ascii_case("wiki") => Self::Wiki,
            Some((_, ext)) if ext.eq_ignore_ascii_case("md") => Self::Markdown,
            _ => Self::Other,
        }
    }

    /// Content type forced by the flavor, if any.
    #[must_use]
    pub fn forced_type(self) -> Option<&'static str> {
        match self {
            Self::Wiki => Some(TRAC_WIKI),
            Self::Markdown => Some(X_MARKDOWN),
            Self::Other => None,
        }
    }
}

/// Outcome of [`MimetypeResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub content_type: ContentType,
    pub flavor: Flavor,
}

/// Resolves the content type of a README candidate.
///
/// Resolution order:
/// 1. `*.wiki` and `*.md` force `text/x-trac-wiki` and `text/x-markdown`
/// 2. the type declared by the repository, unless empty or
///    `application/octet-stream`
/// 3. the sniffer, fed at most [`DEFAULT_SNIFF_BYTES`] leading bytes
/// 4. `text/plain`
#[derive(Clone)]
pub struct MimetypeResolver {
    sniffer: Arc<dyn ContentSniffer>,
    sniff_bytes: usize,
}

impl MimetypeResolver {
    /// Create a resolver around `sniffer`.
    #[must_use]
    pub fn new(sniffer: Arc<dyn ContentSniffer>) -> Self {
        Self {
            sniffer,
            sniff_bytes: DEFAULT_SNIFF_BYTES,
        }
    }

    /// Limit the number of bytes handed to the sniffer.
    #[must_use]
    pub fn with_sniff_bytes(mut self, sniff_bytes: usize) -> Self {
        self.sniff_bytes = sniff_bytes;
        self
    }

    /// Resolve the content type for `filename`.
    ///
    /// `head` is only consulted when neither the name nor the declared type
    /// decides, so callers may pass the full content.
    #[must_use]
    pub fn resolve(&self, filename: &str, declared: Option<&str>, head: &[u8]) -> Resolved {
        let flavor = Flavor::from_name(filename);
        if let Some(forced) = flavor.forced_type() {
            return Resolved {
                content_type: ContentType::new(forced),
                flavor,
            };
        }

        if let Some(declared) = declared.map(ContentType::new)
            && !declared.essence().is_empty()
            && !declared.is(OCTET_STREAM)
        {
            return Resolved {
                content_type: declared,
                flavor,
            };
        }

        let head = &head[..head.len().min(self.sniff_bytes)];
        let sniffed = self
            .sniffer
            .sniff(filename, head)
            .filter(|t| !t.trim().is_empty());
        tracing::debug!(filename, sniffed = ?sniffed, "Sniffed content type");

        Resolved {
            content_type: ContentType::new(sniffed.unwrap_or_else(|| PLAIN_TEXT.to_owned())),
            flavor,
        }
    }
}

impl Default for MimetypeResolver {
    fn default() -> Self {
        Self::new(Arc::new(DefaultSniffer))
    }
}

impl std::fmt::Debug for MimetypeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MimetypeResolver")
            .field("sniff_bytes", &self.sniff_bytes)
            .finish_non_exhaustive()
    }
}
