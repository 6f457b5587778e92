//! Renderer registry with quality-scored selection.

use crate::content_type::ContentType;
use crate::markdown::MarkdownRenderer;
use crate::plain::PlainTextRenderer;
use crate::renderer::Renderer;

/// Renderer chosen for a content type.
#[derive(Clone, Copy)]
pub struct Selection<'a> {
    pub renderer: &'a dyn Renderer,
    pub quality: u32,
}

impl std::fmt::Debug for Selection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("renderer", &self.renderer.name())
            .field("quality", &self.quality)
            .finish()
    }
}

/// Immutable set of renderers, built once at startup.
///
/// Selection asks every renderer for its quality and returns the highest
/// scorer. Ties go to the renderer registered first. A best score of zero
/// selects nothing.
pub struct RendererRegistry {
    renderers: Vec<Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> RendererRegistryBuilder {
        RendererRegistryBuilder::default()
    }

    /// Registry holding the markdown renderer followed by the plain text
    /// renderer.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::builder()
            .register(MarkdownRenderer)
            .register(PlainTextRenderer)
            .build()
    }

    /// Select the best renderer for `content_type`.
    #[must_use]
    pub fn select(&self, content_type: &ContentType) -> Option<Selection<'_>> {
        let mut best: Option<Selection<'_>> = None;
        for renderer in &self.renderers {
            let quality = renderer.quality(content_type);
            if quality > 0 && best.is_none_or(|b| quality > b.quality) {
                best = Some(Selection {
                    renderer: renderer.as_ref(),
                    quality,
                });
            }
        }
        best
    }

    /// Registered renderer names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.renderers.iter().map(|r| r.name())
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Builder for [`RendererRegistry`].
#[derive(Default)]
pub struct RendererRegistryBuilder {
    renderers: Vec<Box<dyn Renderer>>,
}

impl RendererRegistryBuilder {
    /// Append a renderer. Earlier renderers win ties.
    #[must_use]
    pub fn register(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> RendererRegistry {
        RendererRegistry {
            renderers: self.renderers,
        }
    }
}
