//! HTML serializer for page trees.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::fmt::Write;

use crate::node::TreeNode;

/// Elements that never have content and are written as `<br />`.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize a [`TreeNode`] back to HTML.
pub struct XhtmlSerializer;

impl XhtmlSerializer {
    /// Create a new serializer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize a tree to an HTML string.
    ///
    /// Document nodes are transparent: only their children are written.
    /// Void elements are self-closed, every other element gets an explicit
    /// end tag.
    pub fn serialize(&self, tree: &TreeNode) -> String {
        let mut out = String::with_capacity(4096);
        if tree.is_document() {
            out.push_str(&escape_text(&tree.text));
            for child in &tree.children {
                serialize_node(child, &mut out);
            }
        } else {
            serialize_node(tree, &mut out);
        }
        out
    }
}

impl Default for XhtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a single node recursively.
fn serialize_node(node: &TreeNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);

    for (key, value) in &node.attrs {
        write!(out, r#" {}="{}""#, key, escape_attr(value)).unwrap();
    }

    let is_void = VOID_ELEMENTS.contains(&node.tag.as_str());
    if is_void && node.children.is_empty() && node.text.is_empty() {
        out.push_str(" />");
    } else {
        out.push('>');

        if RAW_TEXT_ELEMENTS.contains(&node.tag.as_str()) {
            out.push_str(&node.text);
        } else {
            out.push_str(&escape_text(&node.text));
        }

        for child in &node.children {
            serialize_node(child, out);
        }

        write!(out, "</{}>", node.tag).unwrap();
    }

    out.push_str(&escape_text(&node.tail));
}

/// Escape text for HTML content.
fn escape_text(text: &str) -> String {
    escape_html(text, false)
}

/// Escape text for HTML attribute values.
fn escape_attr(text: &str) -> String {
    escape_html(text, true)
}

fn escape_html(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}
