//! Plain text renderer.

use readmes_tree::TreeNode;

use crate::assets::AssetSink;
use crate::content_type::ContentType;
use crate::renderer::{RenderError, RenderInput, RenderedFragment, Renderer, decode_text};

/// Last-resort renderer for any `text/*` content.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    pub const NAME: &'static str = "plain";
}

impl Renderer for PlainTextRenderer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn quality(&self, content_type: &ContentType) -> u32 {
        u32::from(content_type.is_text())
    }

    fn render(
        &self,
        input: &RenderInput<'_>,
        _assets: &mut dyn AssetSink,
    ) -> Result<RenderedFragment, RenderError> {
        let text = decode_text(input.content)?;
        Ok(RenderedFragment::Tree(
            TreeNode::new("pre").with_attr("class", "code").with_text(text),
        ))
    }
}
