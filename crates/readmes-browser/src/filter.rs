//! Page-level activation of README rendering.

use readmes_render::Flavor;
use readmes_tree::TreeNode;

use crate::context::{PageData, PageKind, RequestContext};
use crate::permission::PermissionDenied;
use crate::pipeline::{ReadmePipeline, SpliceReport};

/// Client-side markdown converter.
pub const MARKED_SCRIPT: &str = "readme/marked.js";
/// Converts `.markdown > pre` blocks with the markdown converter on page load.
pub const README_SCRIPT: &str = "readme/readme.js";

/// Page filter invoked once per rendered page.
///
/// On browser pages that show a directory listing or a markdown file it
/// registers the client-side scripts. Directory listings additionally get
/// their README blocks spliced in. All other pages pass through untouched.
#[derive(Debug, Clone)]
pub struct PageActivationFilter {
    pipeline: ReadmePipeline,
}

impl PageActivationFilter {
    #[must_use]
    pub fn new(pipeline: ReadmePipeline) -> Self {
        Self { pipeline }
    }

    /// Filter `tree` for a page of `kind` described by `data`.
    ///
    /// Returns the splice report when a splice pass ran.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] if the splice pass was refused.
    pub fn filter(
        &self,
        kind: PageKind,
        tree: &mut TreeNode,
        data: &PageData,
        request: &mut RequestContext<'_>,
    ) -> Result<Option<SpliceReport>, PermissionDenied> {
        if kind != PageKind::Browser {
            return Ok(None);
        }

        let markdown_file = Flavor::from_name(&data.path) == Flavor::Markdown;
        if data.is_directory() || markdown_file {
            request.assets.add_script(MARKED_SCRIPT);
            request.assets.add_script(README_SCRIPT);
        }

        let Some(listing) = &data.listing else {
            return Ok(None);
        };
        self.pipeline
            .run(
                tree,
                listing,
                data.revision.as_deref(),
                &data.resource(),
                request,
            )
            .map(Some)
    }
}
