//! Discovery, rendering and splicing for one directory listing.

use std::sync::Arc;

use readmes_render::{MimetypeResolver, Preview};
use readmes_repo::{DirEntry, Repository};
use readmes_tree::{TreeNode, TreeSplicer};

use crate::context::RequestContext;
use crate::discovery::ReadmeDiscovery;
use crate::fragment::{FragmentOutcome, FragmentRenderer, SkipReason};
use crate::permission::{FILE_VIEW, PermissionDenied, Resource};

/// Stylesheet registered for every splice pass.
pub const CODE_STYLESHEET: &str = "common/css/code.css";

/// Summary of one splice pass.
#[derive(Debug, Default)]
pub struct SpliceReport {
    /// Paths of candidates that produced a block, in listing order.
    pub rendered: Vec<String>,
    /// Paths of candidates that were skipped, with the reason.
    pub skipped: Vec<(String, SkipReason)>,
    /// Number of blocks inserted into the page. Zero when the anchor is
    /// missing, even if blocks were rendered.
    pub inserted: usize,
}

impl SpliceReport {
    /// Number of candidates considered.
    #[must_use]
    pub fn candidates(&self) -> usize {
        self.rendered.len() + self.skipped.len()
    }
}

/// Runs discovery, rendering and splicing for a directory listing.
///
/// Holds no per-request state, so one pipeline serves any number of
/// concurrent requests and repeated runs on the same input give the same
/// blocks.
#[derive(Debug, Clone)]
pub struct ReadmePipeline {
    discovery: ReadmeDiscovery,
    fragments: FragmentRenderer,
    splicer: TreeSplicer,
}

impl ReadmePipeline {
    /// Create a pipeline with default discovery, resolver and anchor.
    #[must_use]
    pub fn new(repo: Arc<dyn Repository>, preview: Arc<dyn Preview>) -> Self {
        Self {
            discovery: ReadmeDiscovery::default(),
            fragments: FragmentRenderer::new(repo, preview),
            splicer: TreeSplicer::default(),
        }
    }

    /// Replace the candidate discovery.
    #[must_use]
    pub fn with_discovery(mut self, discovery: ReadmeDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Replace the content type resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: MimetypeResolver) -> Self {
        self.fragments = self.fragments.with_resolver(resolver);
        self
    }

    /// Replace the splicer, and with it the anchor.
    #[must_use]
    pub fn with_splicer(mut self, splicer: TreeSplicer) -> Self {
        self.splicer = splicer;
        self
    }

    /// Splice README blocks for `listing` into `tree`.
    ///
    /// `FILE_VIEW` on `resource` is checked once, before any content is
    /// read, and only if the listing has candidates.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] if `FILE_VIEW` is not granted; `tree` is
    /// left untouched. Per-candidate failures are reported in the
    /// [`SpliceReport`] instead.
    pub fn run(
        &self,
        tree: &mut TreeNode,
        listing: &[DirEntry],
        revision: Option<&str>,
        resource: &Resource,
        request: &mut RequestContext<'_>,
    ) -> Result<SpliceReport, PermissionDenied> {
        request.assets.add_stylesheet(CODE_STYLESHEET);

        let candidates = self.discovery.discover(listing);
        let mut report = SpliceReport::default();
        if candidates.is_empty() {
            tracing::debug!(path = %resource.path, "No README candidates");
            return Ok(report);
        }

        request.perm.require(FILE_VIEW, resource)?;

        let mut blocks = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self
                .fragments
                .render_one(candidate, revision, &mut *request.assets)
            {
                FragmentOutcome::Rendered(block) => {
                    blocks.push(block);
                    report.rendered.push(candidate.path.clone());
                }
                FragmentOutcome::Skipped(reason) => {
                    tracing::debug!(path = %candidate.path, %reason, "Skipping README");
                    report.skipped.push((candidate.path.clone(), reason));
                }
            }
        }

        report.inserted = self.splicer.splice_all(tree, blocks);
        tracing::debug!(
            path = %resource.path,
            candidates = report.candidates(),
            rendered = report.rendered.len(),
            skipped = report.skipped.len(),
            inserted = report.inserted,
            "README splice pass finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use readmes_render::{RegistryPreview, RequestAssets};
    use readmes_repo::{MockRepository, RepoErrorKind};
    use readmes_tree::{XhtmlParser, XhtmlSerializer};

    use super::*;
    use crate::permission::{BROWSER_VIEW, StaticPermissions};

    const PAGE: &str = r#"<html><body><div id="content"><table id="dirlist"></table><div id="help">Help</div></div></body></html>"#;

    fn pipeline(repo: MockRepository) -> ReadmePipeline {
        ReadmePipeline::new(Arc::new(repo), Arc::new(RegistryPreview::default()))
    }

    fn page() -> TreeNode {
        XhtmlParser::new().parse(PAGE).unwrap()
    }

    /// Children of `div#content`.
    fn content(tree: &TreeNode) -> &[TreeNode] {
        &tree
            .find(&|n| n.id() == Some("content"))
            .unwrap()
            .children
    }

    /// Heading ids of the spliced blocks.
    fn block_ids(tree: &TreeNode) -> Vec<String> {
        content(tree)
            .iter()
            .filter(|n| n.has_class("readme"))
            .map(|n| n.children[0].id().unwrap().to_owned())
            .collect()
    }

    fn run(
        pipeline: &ReadmePipeline,
        tree: &mut TreeNode,
        listing: &[DirEntry],
        perm: &StaticPermissions,
        assets: &mut RequestAssets,
    ) -> Result<SpliceReport, PermissionDenied> {
        let mut request = RequestContext::new(perm, assets);
        pipeline.run(tree, listing, None, &Resource::new("", None), &mut request)
    }

    #[test]
    fn test_scenario_listing() {
        let repo = MockRepository::new()
            .with_file("README.md", "# Project")
            .with_dir("docs")
            .with_file("readme.wiki", "= Project =");
        let listing = repo_listing(&repo);
        let pipeline = pipeline(repo);
        let perm = StaticPermissions::new([FILE_VIEW]);
        let mut assets = RequestAssets::new();
        let mut tree = page();

        let report = run(&pipeline, &mut tree, &listing, &perm, &mut assets).unwrap();

        assert_eq!(report.rendered, ["README.md", "readme.wiki"]);
        assert_eq!(report.inserted, 2);
        let children = content(&tree);
        let tags: Vec<_> = children
            .iter()
            .map(|n| n.id().or(n.attr("class")).unwrap_or_default())
            .collect();
        assert_eq!(tags, ["dirlist", "readme", "readme", "help"]);
        assert_eq!(children[1].children[1].attr("class"), Some("searchable markdown"));
        assert_eq!(children[2].children[1].attr("class"), Some("searchable wiki"));
        assert_eq!(
            assets.stylesheets(),
            ["common/css/code.css", "readme/readme.css"]
        );
    }

    fn repo_listing(repo: &MockRepository) -> Vec<DirEntry> {
        repo.list("", None).unwrap()
    }

    #[test]
    fn test_fault_isolation() {
        let repo = MockRepository::new()
            .with_file("README", "one")
            .with_failing_file("README.md", RepoErrorKind::Unavailable)
            .with_file("readme.txt", "three");
        let listing = repo_listing(&repo);
        let pipeline = pipeline(repo);
        let perm = StaticPermissions::new([FILE_VIEW]);
        let mut assets = RequestAssets::new();
        let mut tree = page();

        let report = run(&pipeline, &mut tree, &listing, &perm, &mut assets).unwrap();

        assert_eq!(block_ids(&tree), ["README", "readme.txt"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "README.md");
        assert!(matches!(
            report.skipped[0].1,
            SkipReason::ContentUnavailable(_)
        ));
        assert_eq!(report.candidates(), 3);
    }

    #[test]
    fn test_permission_denied_aborts_pass() {
        let repo = MockRepository::new().with_file("README.md", "# Hi");
        let listing = repo_listing(&repo);
        let pipeline = pipeline(repo);
        let perm = StaticPermissions::new([BROWSER_VIEW]);
        let mut assets = RequestAssets::new();
        let mut tree = page();

        let err = run(&pipeline, &mut tree, &listing, &perm, &mut assets).unwrap_err();

        assert_eq!(err.action, FILE_VIEW);
        assert_eq!(tree, page());
        assert!(!assets.stylesheets().iter().any(|s| s == "readme/readme.css"));
    }

    #[test]
    fn test_no_candidates_skips_permission_check() {
        let repo = MockRepository::new().with_file("main.rs", "fn main() {}");
        let listing = repo_listing(&repo);
        let pipeline = pipeline(repo);
        let perm = StaticPermissions::default();
        let mut assets = RequestAssets::new();
        let mut tree = page();

        let report = run(&pipeline, &mut tree, &listing, &perm, &mut assets).unwrap();

        assert_eq!(report.candidates(), 0);
        assert_eq!(tree, page());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let repo = MockRepository::new()
            .with_file("README.md", "# A")
            .with_file("README.txt", "B");
        let listing = repo_listing(&repo);
        let pipeline = pipeline(repo);
        let perm = StaticPermissions::new([FILE_VIEW]);
        let serializer = XhtmlSerializer::new();

        let mut outputs = Vec::new();
        for _ in 0..2 {
            let mut assets = RequestAssets::new();
            let mut tree = page();
            run(&pipeline, &mut tree, &listing, &perm, &mut assets).unwrap();
            outputs.push((serializer.serialize(&tree), assets));
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_missing_anchor_leaves_tree_untouched() {
        let repo = MockRepository::new().with_file("README", "text");
        let listing = repo_listing(&repo);
        let pipeline = pipeline(repo);
        let perm = StaticPermissions::new([FILE_VIEW]);
        let mut assets = RequestAssets::new();
        let mut tree = XhtmlParser::new()
            .parse("<html><body><p>No help here</p></body></html>")
            .unwrap();
        let before = tree.clone();

        let report = run(&pipeline, &mut tree, &listing, &perm, &mut assets).unwrap();

        assert_eq!(report.rendered, ["README"]);
        assert_eq!(report.inserted, 0);
        assert_eq!(tree, before);
    }
}
