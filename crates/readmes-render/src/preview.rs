//! Preview entry point used by the page pipeline.

use std::sync::Arc;

use crate::assets::AssetSink;
use crate::registry::RendererRegistry;
use crate::renderer::{RenderError, RenderInput, RenderedFragment};

/// Default upper bound on previewed content, in bytes.
pub const DEFAULT_MAX_PREVIEW_SIZE: usize = 262_144;

/// Produces a renderable fragment for a piece of content.
pub trait Preview: Send + Sync {
    /// Preview `input`.
    ///
    /// Returns `Ok(None)` when no renderer supports the content type.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the content is too large or the selected
    /// renderer fails.
    fn preview(
        &self,
        input: &RenderInput<'_>,
        assets: &mut dyn AssetSink,
    ) -> Result<Option<RenderedFragment>, RenderError>;
}

/// [`Preview`] backed by a [`RendererRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryPreview {
    registry: Arc<RendererRegistry>,
    max_preview_size: usize,
}

impl RegistryPreview {
    /// Create a preview with the default size limit.
    #[must_use]
    pub fn new(registry: Arc<RendererRegistry>) -> Self {
        Self {
            registry,
            max_preview_size: DEFAULT_MAX_PREVIEW_SIZE,
        }
    }

    /// Set the size limit.
    #[must_use]
    pub fn with_max_preview_size(mut self, max_preview_size: usize) -> Self {
        self.max_preview_size = max_preview_size;
        self
    }
}

impl Default for RegistryPreview {
    fn default() -> Self {
        Self::new(Arc::new(RendererRegistry::with_defaults()))
    }
}

impl Preview for RegistryPreview {
    fn preview(
        &self,
        input: &RenderInput<'_>,
        assets: &mut dyn AssetSink,
    ) -> Result<Option<RenderedFragment>, RenderError> {
        if input.length > self.max_preview_size {
            return Err(RenderError::TooLarge {
                length: input.length,
                limit: self.max_preview_size,
            });
        }

        let Some(selection) = self.registry.select(input.content_type) else {
            tracing::debug!(
                path = input.path,
                content_type = %input.content_type,
                "No renderer for content type"
            );
            return Ok(None);
        };

        tracing::debug!(
            path = input.path,
            renderer = selection.renderer.name(),
            quality = selection.quality,
            "Selected renderer"
        );
        selection.renderer.render(input, assets).map(Some)
    }
}
