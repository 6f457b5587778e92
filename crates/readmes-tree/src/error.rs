//! Error types for document tree handling.

/// Error while parsing a page or a node path.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// Encoding error while decoding element names or text.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Node path selector could not be parsed.
    #[error("invalid node path `{path}`: {reason}")]
    InvalidPath {
        /// Selector as written.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}
