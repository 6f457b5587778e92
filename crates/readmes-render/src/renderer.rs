//! Renderer trait and shared types.

use readmes_tree::TreeNode;

use crate::assets::AssetSink;
use crate::content_type::ContentType;

/// Error produced while rendering a preview.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Content looks binary and cannot be shown as text.
    #[error("binary content cannot be previewed")]
    Binary,

    /// Content exceeds the configured preview limit.
    #[error("content of {length} bytes exceeds the preview limit of {limit} bytes")]
    TooLarge { length: usize, limit: usize },

    /// Renderer-specific failure.
    #[error("{renderer} renderer failed: {message}")]
    Failed {
        renderer: &'static str,
        message: String,
    },
}

/// Everything a renderer needs to produce a preview.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    /// Repository path of the file.
    pub path: &'a str,
    /// Raw file content.
    pub content: &'a [u8],
    /// Content length in bytes, as reported by the repository.
    pub length: usize,
    /// Resolved content type.
    pub content_type: &'a ContentType,
}

impl<'a> RenderInput<'a> {
    /// Create an input whose length is the length of `content`.
    #[must_use]
    pub fn new(path: &'a str, content: &'a [u8], content_type: &'a ContentType) -> Self {
        Self {
            path,
            content,
            length: content.len(),
            content_type,
        }
    }
}

/// Output of a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedFragment {
    /// Markup to splice as-is.
    Tree(TreeNode),
    /// Plain text, escaped on output.
    Text(String),
}

impl RenderedFragment {
    /// Append the fragment as the last content of `parent`.
    ///
    /// Text goes to the tail of the last child, or to the parent's own text
    /// when it has no children.
    pub fn append_to(self, parent: &mut TreeNode) {
        match self {
            Self::Tree(node) => parent.children.push(node),
            Self::Text(text) => match parent.children.last_mut() {
                Some(last) => last.tail.push_str(&text),
                None => parent.text.push_str(&text),
            },
        }
    }
}

/// A renderer that produces previews for the content types it supports.
pub trait Renderer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// How well this renderer handles `content_type`. Zero means not at all.
    fn quality(&self, content_type: &ContentType) -> u32;

    /// Render `input`, registering any assets the output needs.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the content cannot be rendered.
    fn render(
        &self,
        input: &RenderInput<'_>,
        assets: &mut dyn AssetSink,
    ) -> Result<RenderedFragment, RenderError>;
}

/// Decode content as text, rejecting anything with a NUL byte.
pub(crate) fn decode_text(content: &[u8]) -> Result<String, RenderError> {
    if content.contains(&0) {
        return Err(RenderError::Binary);
    }
    let content = content.strip_prefix(b"\xef\xbb\xbf").unwrap_or(content);
    Ok(String::from_utf8_lossy(content).into_owned())
}
