//! Content type resolution and renderer selection.
//!
//! This crate decides how a file should be previewed:
//!
//! - [`MimetypeResolver`] picks a [`ContentType`] from the file name, the
//!   type declared by the repository, and a content sniff
//! - [`RendererRegistry`] scores every [`Renderer`] for that type and selects
//!   the best one, ties going to the earliest registered renderer
//! - [`RegistryPreview`] wraps the registry behind the [`Preview`] trait used
//!   by the page pipeline
//!
//! Renderers do not convert markup. The markdown renderer hands the raw text
//! to the browser inside a `<pre>` element; client-side scripts do the rest.
//!
//! # Example
//!
//! ```
//! use readmes_render::{ContentType, MarkdownRenderer, Renderer, RendererRegistry};
//!
//! let registry = RendererRegistry::with_defaults();
//! let selection = registry.select(&ContentType::new("text/x-markdown")).unwrap();
//! assert_eq!(selection.renderer.name(), MarkdownRenderer::NAME);
//! assert_eq!(selection.quality, 8);
//! ```

mod assets;
mod content_type;
mod markdown;
mod mimetype;
mod plain;
mod preview;
mod registry;
mod renderer;
mod sniff;

pub use assets::{AssetSink, RequestAssets};
pub use content_type::{
    ContentType, MARKDOWN_TYPES, OCTET_STREAM, PLAIN_TEXT, TRAC_WIKI, X_MARKDOWN,
};
pub use markdown::{MarkdownRenderer, README_STYLESHEET};
pub use mimetype::{DEFAULT_SNIFF_BYTES, Flavor, MimetypeResolver, Resolved};
pub use plain::PlainTextRenderer;
pub use preview::{DEFAULT_MAX_PREVIEW_SIZE, Preview, RegistryPreview};
pub use registry::{RendererRegistry, RendererRegistryBuilder, Selection};
pub use renderer::{RenderError, RenderInput, RenderedFragment, Renderer};
pub use sniff::{ContentSniffer, DefaultSniffer};
