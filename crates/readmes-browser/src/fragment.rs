//! Rendering one README candidate into a page block.

use std::sync::Arc;

use readmes_render::{
    AssetSink, ContentType, Flavor, MimetypeResolver, Preview, RenderError, RenderInput,
    RenderedFragment,
};
use readmes_repo::{DirEntry, RepoError, Repository};
use readmes_tree::TreeNode;

/// Why a candidate produced no block.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    /// No renderer supports the resolved content type.
    #[error("no renderer for {0}")]
    NoRenderer(ContentType),

    /// The content could not be read from the repository.
    #[error("content unavailable: {0}")]
    ContentUnavailable(#[source] RepoError),

    /// The selected renderer failed.
    #[error("rendering failed: {0}")]
    RenderingFailed(#[source] RenderError),
}

/// Result of rendering one candidate.
#[derive(Debug)]
pub enum FragmentOutcome {
    /// A block ready to be spliced into the page.
    Rendered(TreeNode),
    /// The candidate contributes nothing.
    Skipped(SkipReason),
}

/// Rendered content of one repository file.
#[derive(Debug)]
pub struct RenderedFile {
    /// Flavor the content type was resolved with.
    pub flavor: Flavor,
    /// Renderer output.
    pub fragment: RenderedFragment,
}

/// Renders README candidates into labelled page blocks.
///
/// Each block looks like:
///
/// ```html
/// <div class="readme" style="padding-top: 1em;">
///   <h1 id="README.md">README.md<a class="anchor" href="#README.md" title="Link to file"> ¶</a></h1>
///   <div class="searchable markdown" title="docs/README.md">…</div>
/// </div>
/// ```
#[derive(Clone)]
pub struct FragmentRenderer {
    repo: Arc<dyn Repository>,
    preview: Arc<dyn Preview>,
    resolver: MimetypeResolver,
}

impl FragmentRenderer {
    /// Create a renderer with the default content type resolver.
    #[must_use]
    pub fn new(repo: Arc<dyn Repository>, preview: Arc<dyn Preview>) -> Self {
        Self {
            repo,
            preview,
            resolver: MimetypeResolver::default(),
        }
    }

    /// Replace the content type resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: MimetypeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Render `candidate` at `revision` into a labelled block.
    ///
    /// Permissions are not checked here; the caller checks them once per
    /// pass.
    pub fn render_one(
        &self,
        candidate: &DirEntry,
        revision: Option<&str>,
        assets: &mut dyn AssetSink,
    ) -> FragmentOutcome {
        match self.render_file(candidate, revision, assets) {
            Ok(file) => {
                let mut body = TreeNode::new("div")
                    .with_attr("class", style_class(file.flavor))
                    .with_attr("title", candidate.path.as_str());
                file.fragment.append_to(&mut body);
                FragmentOutcome::Rendered(wrap(&candidate.name, body))
            }
            Err(reason) => FragmentOutcome::Skipped(reason),
        }
    }

    /// Fetch, resolve and render the content of `entry` at `revision`.
    ///
    /// Shared by README blocks and single file views.
    ///
    /// # Errors
    ///
    /// Returns the [`SkipReason`] when the content cannot be read, no
    /// renderer supports it, or rendering fails.
    pub fn render_file(
        &self,
        entry: &DirEntry,
        revision: Option<&str>,
        assets: &mut dyn AssetSink,
    ) -> Result<RenderedFile, SkipReason> {
        let node = self
            .repo
            .get_node(&entry.path, revision)
            .map_err(SkipReason::ContentUnavailable)?;

        let resolved = self
            .resolver
            .resolve(&entry.name, node.content_type(), node.content());
        let input = RenderInput {
            path: &entry.path,
            content: node.content(),
            length: node.content_length(),
            content_type: &resolved.content_type,
        };

        match self.preview.preview(&input, assets) {
            Ok(Some(fragment)) => Ok(RenderedFile {
                flavor: resolved.flavor,
                fragment,
            }),
            Ok(None) => Err(SkipReason::NoRenderer(resolved.content_type)),
            Err(e) => Err(SkipReason::RenderingFailed(e)),
        }
    }
}

impl std::fmt::Debug for FragmentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentRenderer")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

/// Class list of the body container. `searchable` marks it for indexing;
/// the second class drives the client-side scripts.
fn style_class(flavor: Flavor) -> &'static str {
    match flavor {
        Flavor::Wiki => "searchable wiki",
        Flavor::Markdown => "searchable markdown",
        Flavor::Other => "searchable",
    }
}

/// Wrap a body container in the labelled block with a deep link.
fn wrap(name: &str, body: TreeNode) -> TreeNode {
    let link = TreeNode::new("a")
        .with_attr("class", "anchor")
        .with_attr("href", format!("#{name}"))
        .with_attr("title", "Link to file")
        .with_text(" \u{b6}");
    let heading = TreeNode::new("h1")
        .with_attr("id", name)
        .with_text(name)
        .with_child(link);
    TreeNode::new("div")
        .with_attr("class", "readme")
        .with_attr("style", "padding-top: 1em;")
        .with_child(heading)
        .with_child(body)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use readmes_render::{RegistryPreview, RequestAssets};
    use readmes_repo::{MockRepository, RepoErrorKind};
    use readmes_tree::XhtmlSerializer;

    use super::*;

    fn renderer(repo: MockRepository) -> FragmentRenderer {
        FragmentRenderer::new(Arc::new(repo), Arc::new(RegistryPreview::default()))
    }

    fn rendered(outcome: FragmentOutcome) -> TreeNode {
        match outcome {
            FragmentOutcome::Rendered(node) => node,
            FragmentOutcome::Skipped(reason) => panic!("unexpected skip: {reason}"),
        }
    }

    #[test]
    fn test_markdown_block() {
        let fragments = renderer(MockRepository::new().with_file("docs/README.md", "# Hi"));
        let mut assets = RequestAssets::new();

        let block = rendered(fragments.render_one(
            &DirEntry::file("docs/README.md"),
            None,
            &mut assets,
        ));

        assert_eq!(
            XhtmlSerializer::new().serialize(&block),
            concat!(
                r#"<div class="readme" style="padding-top: 1em;">"#,
                r##"<h1 id="README.md">README.md<a class="anchor" href="#README.md" title="Link to file"> ¶</a></h1>"##,
                r#"<div class="searchable markdown" title="docs/README.md"><pre># Hi</pre></div>"#,
                "</div>",
            )
        );
        assert_eq!(assets.stylesheets(), ["readme/readme.css"]);
    }

    #[test]
    fn test_md_forces_markdown_over_declared_type() {
        let fragments = renderer(MockRepository::new().with_typed_file(
            "README.md",
            "application/octet-stream",
            "text",
        ));
        let mut assets = RequestAssets::new();

        let block = rendered(fragments.render_one(&DirEntry::file("README.md"), None, &mut assets));
        assert_eq!(block.children[1].attr("class"), Some("searchable markdown"));
        assert_eq!(block.children[1].children[0].tag, "pre");
    }

    #[test]
    fn test_wiki_block() {
        let fragments = renderer(MockRepository::new().with_file("readme.wiki", "= Title ="));
        let mut assets = RequestAssets::new();

        let block = rendered(fragments.render_one(&DirEntry::file("readme.wiki"), None, &mut assets));
        let body = &block.children[1];
        assert_eq!(body.attr("class"), Some("searchable wiki"));
        assert_eq!(body.children[0].attr("class"), Some("code"));
    }

    #[test]
    fn test_unsupported_type_is_skipped() {
        let fragments = renderer(MockRepository::new().with_typed_file(
            "README.png",
            "image/png",
            b"\x89PNG".to_vec(),
        ));
        let mut assets = RequestAssets::new();

        let outcome = fragments.render_one(&DirEntry::file("README.png"), None, &mut assets);
        assert!(matches!(
            outcome,
            FragmentOutcome::Skipped(SkipReason::NoRenderer(ref ct)) if ct.is("image/png")
        ));
        assert_eq!(assets, RequestAssets::new());
    }

    #[test]
    fn test_plain_readme_is_searchable() {
        let fragments = renderer(MockRepository::new().with_file("README", "Just text"));
        let mut assets = RequestAssets::new();

        let block = rendered(fragments.render_one(&DirEntry::file("README"), None, &mut assets));
        let body = &block.children[1];
        assert_eq!(body.attr("class"), Some("searchable"));
        assert_eq!(body.attr("title"), Some("README"));
        assert_eq!(body.text_content(), "Just text");
    }

    #[test]
    fn test_unavailable_content() {
        let fragments = renderer(
            MockRepository::new().with_failing_file("README", RepoErrorKind::Unavailable),
        );
        let mut assets = RequestAssets::new();

        let outcome = fragments.render_one(&DirEntry::file("README"), None, &mut assets);
        assert!(matches!(
            outcome,
            FragmentOutcome::Skipped(SkipReason::ContentUnavailable(ref e))
                if e.kind == RepoErrorKind::Unavailable
        ));
    }

    #[test]
    fn test_binary_content_fails_rendering() {
        let fragments = renderer(MockRepository::new().with_file("README.md", b"\0\x01".to_vec()));
        let mut assets = RequestAssets::new();

        let outcome = fragments.render_one(&DirEntry::file("README.md"), None, &mut assets);
        assert!(matches!(
            outcome,
            FragmentOutcome::Skipped(SkipReason::RenderingFailed(RenderError::Binary))
        ));
    }

    #[test]
    fn test_render_file_reports_flavor() {
        let fragments = renderer(MockRepository::new().with_file("docs/guide.md", "# Guide"));
        let mut assets = RequestAssets::new();

        let file = fragments
            .render_file(&DirEntry::file("docs/guide.md"), None, &mut assets)
            .unwrap();
        assert_eq!(file.flavor, Flavor::Markdown);

        let mut body = TreeNode::new("div");
        file.fragment.append_to(&mut body);
        assert_eq!(XhtmlSerializer::new().serialize(&body), "<div><pre># Guide</pre></div>");
    }

    #[test]
    fn test_render_file_missing_is_unavailable() {
        let fragments = renderer(MockRepository::new());
        let mut assets = RequestAssets::new();

        let err = fragments
            .render_file(&DirEntry::file("nope.md"), None, &mut assets)
            .unwrap_err();
        assert!(matches!(err, SkipReason::ContentUnavailable(_)));
    }

    #[test]
    fn test_reads_requested_revision() {
        let fragments = renderer(
            MockRepository::new()
                .with_file("README", "new")
                .with_revision("3", "README", "old"),
        );
        let mut assets = RequestAssets::new();

        let block = rendered(fragments.render_one(&DirEntry::file("README"), Some("3"), &mut assets));
        assert_eq!(block.children[1].text_content(), "old");
    }
}
