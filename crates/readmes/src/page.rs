//! Browser page assembly.

use readmes_config::AssetsConfig;
use readmes_render::RequestAssets;
use readmes_repo::{DirEntry, parent_path};
use readmes_tree::{NodePath, TreeError, TreeNode, XhtmlParser, XhtmlSerializer};

/// Built-in browser page template.
pub(crate) const BROWSER_TEMPLATE: &str = include_str!("../templates/browser.html");

const TITLE: &str = "head > title";
const HEADING: &str = "h1#title";
const LISTING_BODY: &str = "table#dirlist > tbody";
const LISTING: &str = "table#dirlist";
const PREVIEW: &str = "div#preview";
const HEAD: &str = "head";

/// A browser page being filled in.
///
/// Elements missing from a user template are skipped.
pub(crate) struct Page {
    tree: TreeNode,
}

impl Page {
    /// Parse a page template.
    pub(crate) fn parse(template: &str) -> Result<Self, TreeError> {
        Ok(Self {
            tree: XhtmlParser::new().parse(template)?,
        })
    }

    /// The page tree.
    pub(crate) fn tree_mut(&mut self) -> &mut TreeNode {
        &mut self.tree
    }

    /// Set the document title and page heading to `path`.
    pub(crate) fn set_title(&mut self, path: &str) {
        let title = format!("/{path}");
        for selector in [TITLE, HEADING] {
            if let Some(node) = node_mut(&mut self.tree, selector) {
                node.text.clone_from(&title);
                node.children.clear();
            }
        }
    }

    /// Fill the directory listing with `entries` and drop the file preview.
    pub(crate) fn fill_listing(&mut self, path: &str, entries: &[DirEntry]) {
        remove(&mut self.tree, PREVIEW);
        let Some(body) = node_mut(&mut self.tree, LISTING_BODY) else {
            tracing::debug!(selector = LISTING_BODY, "Template has no listing");
            return;
        };
        if !path.is_empty() {
            body.children.push(row("..", parent_path(path), true));
        }
        body.children
            .extend(entries.iter().map(|e| row(&e.name, &e.path, e.is_dir)));
    }

    /// Put `preview` in the file preview and drop the directory listing.
    pub(crate) fn fill_preview(&mut self, preview: Option<TreeNode>) {
        remove(&mut self.tree, LISTING);
        let Some(container) = node_mut(&mut self.tree, PREVIEW) else {
            tracing::debug!(selector = PREVIEW, "Template has no preview");
            return;
        };
        match preview {
            Some(node) => container.children.push(node),
            None => container.text = "No preview available.".to_owned(),
        }
    }

    /// Add `<link>` and `<script>` elements for the registered assets to
    /// `<head>`.
    pub(crate) fn inject_assets(&mut self, assets: &RequestAssets, config: &AssetsConfig) {
        let Some(head) = node_mut(&mut self.tree, HEAD) else {
            tracing::debug!("Template has no head, assets not injected");
            return;
        };
        for name in assets.stylesheets() {
            head.children.push(
                TreeNode::new("link")
                    .with_attr("rel", "stylesheet")
                    .with_attr("type", "text/css")
                    .with_attr("href", config.url(name)),
            );
        }
        for name in assets.scripts() {
            head.children.push(
                TreeNode::new("script")
                    .with_attr("type", "text/javascript")
                    .with_attr("src", config.url(name)),
            );
        }
    }

    /// Serialize the page as an HTML document.
    pub(crate) fn to_html(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n");
        html.push_str(&XhtmlSerializer::new().serialize(&self.tree));
        html.push('\n');
        html
    }
}

/// Listing row linking to `path`.
fn row(name: &str, path: &str, is_dir: bool) -> TreeNode {
    let link = TreeNode::new("a")
        .with_attr("class", if is_dir { "dir" } else { "file" })
        .with_attr("href", format!("/browser/{path}"))
        .with_text(name);
    TreeNode::new("tr").with_child(
        TreeNode::new("td")
            .with_attr("class", "name")
            .with_child(link),
    )
}

/// Node matching `selector`, a constant of this module.
fn node_mut<'a>(tree: &'a mut TreeNode, selector: &str) -> Option<&'a mut TreeNode> {
    let path: NodePath = selector.parse().ok()?;
    let indices = path.locate(tree)?;
    tree.node_at_mut(&indices)
}

/// Remove the node matching `selector`, if any.
fn remove(tree: &mut TreeNode, selector: &str) {
    let Some(mut indices) = selector
        .parse::<NodePath>()
        .ok()
        .and_then(|path| path.locate(tree))
    else {
        return;
    };
    let Some(index) = indices.pop() else {
        return;
    };
    if let Some(parent) = tree.node_at_mut(&indices) {
        parent.children.remove(index);
    }
}
