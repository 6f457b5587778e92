//! XHTML page parser.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::borrow::Cow;
use std::io::BufRead;
use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;

use crate::entities::convert_html_entities;
use crate::error::TreeError;
use crate::node::{DOCUMENT_TAG, TreeNode};

/// XML declaration and doctype in front of the root element.
static PROLOGUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*(?:<\?xml.*?\?>\s*)?(?:<!DOCTYPE[^>]*>\s*)?")
        .expect("invalid prologue regex")
});

/// Wrapper element so that fragments with several top-level nodes parse.
const WRAPPER: &str = "readmes-root";

/// Parse XHTML into a [`TreeNode`] document.
pub struct XhtmlParser;

impl XhtmlParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse an XHTML page or fragment.
    ///
    /// The returned node is a document node (see [`DOCUMENT_TAG`]) whose
    /// children are the top-level elements. A leading XML declaration and
    /// doctype are dropped. Comments and processing instructions are
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not well-formed XML.
    pub fn parse(&self, xhtml: &str) -> Result<TreeNode, TreeError> {
        let body = PROLOGUE_PATTERN.replace(xhtml, "");
        let body = convert_html_entities(&body);
        let wrapped = format!("<{WRAPPER}>{body}</{WRAPPER}>");

        let mut reader = Reader::from_str(&wrapped);
        reader.config_mut().trim_text(false);

        // Consume the wrapper start tag.
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(_) | Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let mut document = self.parse_children(&mut reader)?;
        document.tag = DOCUMENT_TAG.to_owned();
        Ok(document)
    }

    /// Parse children until the matching end tag of the current element.
    fn parse_children<R: BufRead>(&self, reader: &mut Reader<R>) -> Result<TreeNode, TreeError> {
        let mut buf = Vec::new();
        let mut node = TreeNode::default();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let tag = self.decode_tag(reader, &e);
                    let attrs = self.decode_attrs(reader, &e);
                    let mut child = self.parse_children(reader)?;
                    child.tag = tag;
                    child.attrs = attrs;
                    node.children.push(child);
                }
                Event::Empty(e) => {
                    let child = TreeNode {
                        tag: self.decode_tag(reader, &e),
                        attrs: self.decode_attrs(reader, &e),
                        ..Default::default()
                    };
                    node.children.push(child);
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?.into_owned();
                    append_text(&mut node, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?.into_owned();
                    append_text(&mut node, &decode_entity(&entity));
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    append_text(&mut node, &text);
                }
                Event::End(_) | Event::Eof => return Ok(node),
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }
    }

    fn decode_tag<R: BufRead>(&self, reader: &Reader<R>, e: &BytesStart) -> String {
        let name = e.name();
        reader.decoder().decode(name.as_ref()).map_or_else(
            |_| String::from_utf8_lossy(name.as_ref()).into_owned(),
            Cow::into_owned,
        )
    }

    fn decode_attrs<R: BufRead>(&self, reader: &Reader<R>, e: &BytesStart) -> Vec<(String, String)> {
        e.attributes()
            .flatten()
            .map(|attr| {
                let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
                    |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                    Cow::into_owned,
                );
                let value = attr.unescape_value().map_or_else(
                    |_| String::from_utf8_lossy(&attr.value).into_owned(),
                    Cow::into_owned,
                );
                (key, value)
            })
            .collect()
    }
}

impl Default for XhtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Append text to node's text or last child's tail.
fn append_text(node: &mut TreeNode, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode an XML entity reference to its character value.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}
