//! Structural node paths.
//!
//! A [`NodePath`] is a chain of `tag#id` steps separated by `>`. The first
//! step matches any element in the tree; every following step matches a
//! direct child of the previous match. `div#content > div#help` therefore
//! means "a `div` with id `help` directly inside a `div` with id `content`".

use std::fmt;
use std::str::FromStr;

use crate::error::TreeError;
use crate::node::TreeNode;

/// One selector step: optional tag name and optional id.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    tag: Option<String>,
    id: Option<String>,
}

impl Step {
    fn parse(source: &str, raw: &str) -> Result<Self, TreeError> {
        let invalid = |reason| TreeError::InvalidPath {
            path: source.to_owned(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("empty step"));
        }
        let (tag, id) = match raw.split_once('#') {
            Some((tag, id)) => (tag, Some(id)),
            None => (raw, None),
        };
        if id.is_some_and(str::is_empty) {
            return Err(invalid("empty id"));
        }
        let valid = |s: &str| {
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        };
        if !valid(tag) && tag != "*" {
            return Err(invalid("invalid tag name"));
        }
        if id.is_some_and(|id| !valid(id)) {
            return Err(invalid("invalid id"));
        }

        Ok(Self {
            tag: (!tag.is_empty() && tag != "*").then(|| tag.to_ascii_lowercase()),
            id: id.map(str::to_owned),
        })
    }

    fn matches(&self, node: &TreeNode) -> bool {
        !node.is_document()
            && self
                .tag
                .as_deref()
                .is_none_or(|tag| node.tag.eq_ignore_ascii_case(tag))
            && self.id.as_deref().is_none_or(|id| node.id() == Some(id))
    }
}

/// Structural selector locating a single node in a page tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    source: String,
    steps: Vec<Step>,
}

impl NodePath {
    /// Locate the first match in document order.
    ///
    /// Returns the child indices leading from `root` to the matched node.
    #[must_use]
    pub fn locate(&self, root: &TreeNode) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        search_descendants(root, &self.steps, &mut path).then_some(path)
    }
}

/// Depth-first search for a node matching the first step whose children
/// satisfy the remaining steps.
fn search_descendants(node: &TreeNode, steps: &[Step], path: &mut Vec<usize>) -> bool {
    let Some((first, rest)) = steps.split_first() else {
        return false;
    };
    for (index, child) in node.children.iter().enumerate() {
        path.push(index);
        if first.matches(child) && follow_children(child, rest, path) {
            return true;
        }
        if search_descendants(child, steps, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn follow_children(node: &TreeNode, steps: &[Step], path: &mut Vec<usize>) -> bool {
    let Some((first, rest)) = steps.split_first() else {
        return true;
    };
    for (index, child) in node.children.iter().enumerate() {
        if first.matches(child) {
            path.push(index);
            if follow_children(child, rest, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}

impl FromStr for NodePath {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = s.trim();
        if source.is_empty() {
            return Err(TreeError::InvalidPath {
                path: s.to_owned(),
                reason: "empty path",
            });
        }
        let steps = source
            .split('>')
            .map(|raw| Step::parse(source, raw.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source: source.to_owned(),
            steps,
        })
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
