//! Splicing rendered fragments into a page tree.

use crate::node::TreeNode;
use crate::path::NodePath;

/// Anchor of the directory browser page: the help panel inside the content
/// container.
pub const DEFAULT_ANCHOR: &str = "div#content > div#help";

/// Inserts fragments immediately before an anchor node.
#[derive(Debug, Clone)]
pub struct TreeSplicer {
    anchor: NodePath,
}

impl TreeSplicer {
    /// Create a splicer for the given anchor.
    #[must_use]
    pub fn new(anchor: NodePath) -> Self {
        Self { anchor }
    }

    /// Insert `fragments`, in order, immediately before the anchor node.
    ///
    /// The anchor is located once per call. Text preceding the anchor stays
    /// in front of the inserted fragments. Returns the number of inserted
    /// fragments; when the anchor is missing the tree is left untouched and
    /// `0` is returned.
    pub fn splice_all(&self, tree: &mut TreeNode, fragments: Vec<TreeNode>) -> usize {
        if fragments.is_empty() {
            return 0;
        }

        let Some(mut indices) = self.anchor.locate(tree) else {
            tracing::debug!(anchor = %self.anchor, "Anchor node not found, nothing spliced");
            return 0;
        };
        // locate() never returns an empty path: the root itself is not a candidate.
        let Some(position) = indices.pop() else {
            return 0;
        };
        let Some(parent) = tree.node_at_mut(&indices) else {
            return 0;
        };

        let count = fragments.len();
        parent.children.splice(position..position, fragments);
        tracing::debug!(anchor = %self.anchor, count, "Spliced fragments");
        count
    }
}

impl Default for TreeSplicer {
    fn default() -> Self {
        let anchor = DEFAULT_ANCHOR
            .parse()
            .expect("default anchor is a valid node path");
        Self::new(anchor)
    }
}
