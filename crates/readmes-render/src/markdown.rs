//! Markdown renderer.

use readmes_tree::TreeNode;

use crate::assets::AssetSink;
use crate::content_type::ContentType;
use crate::renderer::{RenderError, RenderInput, RenderedFragment, Renderer, decode_text};

/// Stylesheet registered whenever markdown is rendered.
pub const README_STYLESHEET: &str = "readme/readme.css";

/// Quality reported for markdown content types.
const MARKDOWN_QUALITY: u32 = 8;

/// Renderer for markdown content.
///
/// Emits the raw text inside `<pre>`; the page script converts it to HTML in
/// the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub const NAME: &'static str = "markdown";
}

impl Renderer for MarkdownRenderer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn quality(&self, content_type: &ContentType) -> u32 {
        if content_type.is_markdown() {
            MARKDOWN_QUALITY
        } else {
            0
        }
    }

    fn render(
        &self,
        input: &RenderInput<'_>,
        assets: &mut dyn AssetSink,
    ) -> Result<RenderedFragment, RenderError> {
        tracing::debug!(path = input.path, "Using markdown renderer");
        let text = decode_text(input.content)?;
        assets.add_stylesheet(README_STYLESHEET);
        Ok(RenderedFragment::Tree(TreeNode::new("pre").with_text(text)))
    }
}
