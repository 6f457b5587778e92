//! README splicing for repository browser pages.
//!
//! The [`PageActivationFilter`] runs once per rendered page. On browser
//! pages it registers the client-side markdown scripts, and on directory
//! listings it drives the [`ReadmePipeline`]:
//!
//! 1. [`ReadmeDiscovery`] picks the files whose name starts with `readme`
//! 2. the `FILE_VIEW` permission is checked once for the whole pass
//! 3. [`FragmentRenderer`] renders each candidate into a labelled block,
//!    skipping candidates that fail
//! 4. the blocks are spliced before the help panel, in listing order
//!
//! Only [`PermissionDenied`] aborts a pass. Every other per-candidate problem
//! is reported as a [`SkipReason`] and logged at debug level.

mod context;
mod discovery;
mod filter;
mod fragment;
mod permission;
mod pipeline;

pub use context::{PageData, PageKind, RequestContext};
pub use discovery::{DEFAULT_README_PREFIX, ReadmeDiscovery};
pub use filter::{MARKED_SCRIPT, PageActivationFilter, README_SCRIPT};
pub use fragment::{FragmentOutcome, FragmentRenderer, RenderedFile, SkipReason};
pub use permission::{
    BROWSER_VIEW, FILE_VIEW, PermissionCheck, PermissionDenied, Resource, StaticPermissions,
};
pub use pipeline::{CODE_STYLESHEET, ReadmePipeline, SpliceReport};
