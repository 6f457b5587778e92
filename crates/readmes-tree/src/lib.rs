//! Document tree for host pages.
//!
//! Host pages are handled as a lightweight element tree ([`TreeNode`]) in the
//! ElementTree style: every element carries its own `text` and the `tail`
//! text that follows it inside the parent.
//!
//! # Architecture
//!
//! - [`XhtmlParser`] turns an XHTML page into a [`TreeNode`] document
//! - [`XhtmlSerializer`] writes a tree back out as HTML
//! - [`NodePath`] is a structural selector (`div#content > div#help`)
//! - [`TreeSplicer`] inserts rendered fragments before an anchor node
//!
//! # Example
//!
//! ```
//! use readmes_tree::{NodePath, TreeNode, TreeSplicer, XhtmlParser, XhtmlSerializer};
//!
//! let mut page = XhtmlParser::new()
//!     .parse(r#"<div id="content"><div id="help">Help</div></div>"#)
//!     .unwrap();
//! let splicer = TreeSplicer::new("div#content > div#help".parse::<NodePath>().unwrap());
//! splicer.splice_all(&mut page, vec![TreeNode::new("p").with_text("Hi")]);
//!
//! assert_eq!(
//!     XhtmlSerializer::new().serialize(&page),
//!     r#"<div id="content"><p>Hi</p><div id="help">Help</div></div>"#
//! );
//! ```

mod entities;
mod error;
mod node;
mod parser;
mod path;
mod serializer;
mod splice;

pub use error::TreeError;
pub use node::{DOCUMENT_TAG, TreeNode};
pub use parser::XhtmlParser;
pub use path::NodePath;
pub use serializer::XhtmlSerializer;
pub use splice::{DEFAULT_ANCHOR, TreeSplicer};
