//! Tree node representation for host pages.

/// Tag of the synthetic node that holds a parsed document's top-level nodes.
///
/// The serializer writes only the children of such a node.
pub const DOCUMENT_TAG: &str = "#document";

/// Element node in a page tree.
///
/// Attributes keep their source order so that serialization is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    /// Element tag name.
    pub tag: String,
    /// Text before the first child.
    pub text: String,
    /// Text after this element, inside the parent.
    pub tail: String,
    /// Element attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Child elements.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new tree node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Create an empty document node.
    #[must_use]
    pub fn document() -> Self {
        Self::new(DOCUMENT_TAG)
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set tail content.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Set an attribute, replacing an existing value.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether this is a document node.
    #[must_use]
    pub fn is_document(&self) -> bool {
        self.tag == DOCUMENT_TAG
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Element `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whether the `class` attribute contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Text of this node and its descendants, excluding this node's tail.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
            out.push_str(&child.tail);
        }
        out
    }

    /// Node reached by following child indices from this node.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&TreeNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// Mutable node reached by following child indices from this node.
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    /// First descendant (depth-first, document order) matching `predicate`.
    #[must_use]
    pub fn find(&self, predicate: &dyn Fn(&TreeNode) -> bool) -> Option<&TreeNode> {
        for child in &self.children {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find(predicate) {
                return Some(found);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut node = TreeNode::new("div")
            .with_attr("id", "a")
            .with_attr("class", "x");
        node.set_attr("id", "b");

        assert_eq!(
            node.attrs,
            vec![
                ("id".to_owned(), "b".to_owned()),
                ("class".to_owned(), "x".to_owned())
            ]
        );
    }

    #[test]
    fn test_has_class() {
        let node = TreeNode::new("div").with_attr("class", "searchable markdown");
        assert!(node.has_class("markdown"));
        assert!(!node.has_class("mark"));
    }

    #[test]
    fn test_text_content_includes_child_tails() {
        let node = TreeNode::new("p")
            .with_text("a ")
            .with_child(TreeNode::new("b").with_text("bold").with_tail(" c"))
            .with_tail(" ignored");
        assert_eq!(node.text_content(), "a bold c");
    }

    #[test]
    fn test_node_at() {
        let tree = TreeNode::document().with_child(
            TreeNode::new("div").with_children(vec![TreeNode::new("p"), TreeNode::new("span")]),
        );
        assert_eq!(tree.node_at(&[0, 1]).map(|n| n.tag.as_str()), Some("span"));
        assert!(tree.node_at(&[0, 2]).is_none());
        assert!(tree.node_at(&[]).is_some_and(TreeNode::is_document));
    }

    #[test]
    fn test_find_is_document_order() {
        let tree = TreeNode::document()
            .with_child(TreeNode::new("div").with_child(TreeNode::new("p").with_text("first")))
            .with_child(TreeNode::new("p").with_text("second"));

        let found = tree.find(&|n| n.tag == "p").unwrap();
        assert_eq!(found.text, "first");
    }
}
