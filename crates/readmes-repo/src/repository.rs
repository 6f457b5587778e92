//! Repository trait and node types.

use crate::error::RepoError;

/// Entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (last path segment).
    pub name: String,
    /// Repository path (e.g., "docs/README.md").
    pub path: String,
    /// True if the entry is a directory.
    pub is_dir: bool,
}

impl DirEntry {
    /// Create a file entry.
    #[must_use]
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, false)
    }

    /// Create a directory entry.
    #[must_use]
    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(path, true)
    }

    fn new(path: impl Into<String>, is_dir: bool) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_owned();
        Self { name, path, is_dir }
    }
}

/// Kind of node at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

/// File content at a given revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    path: String,
    content_type: Option<String>,
    content: Vec<u8>,
}

impl Node {
    /// Create a node with content and no declared content type.
    #[must_use]
    pub fn new(path: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content_type: None,
            content,
        }
    }

    /// Attach the content type declared by the backend.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Repository path of the node.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Content type declared by the backend, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Full content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content length in bytes.
    pub fn content_length(&self) -> usize {
        self.content.len()
    }
}

/// Repository abstraction resolving paths at a revision.
///
/// `revision` is backend-specific; `None` means the latest state.
pub trait Repository: Send + Sync {
    /// Fetch file content.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] if the path does not exist, is not a file, or
    /// cannot be read.
    fn get_node(&self, path: &str, revision: Option<&str>) -> Result<Node, RepoError>;

    /// List the direct entries of a directory.
    ///
    /// Entries are ordered directories first, then by name.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] if the path does not exist or is not a directory.
    fn list(&self, path: &str, revision: Option<&str>) -> Result<Vec<DirEntry>, RepoError>;

    /// Kind of node at a path.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] if the path does not exist.
    fn kind(&self, path: &str, revision: Option<&str>) -> Result<NodeKind, RepoError>;
}

/// Join a repository directory path and an entry name.
///
/// # Examples
///
/// ```
/// use readmes_repo::join_path;
///
/// assert_eq!(join_path("", "README.md"), "README.md");
/// assert_eq!(join_path("docs", "README.md"), "docs/README.md");
/// ```
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}

/// Parent directory of a repository path (`""` for top-level entries).
///
/// # Examples
///
/// ```
/// use readmes_repo::parent_path;
///
/// assert_eq!(parent_path("docs/README.md"), "docs");
/// assert_eq!(parent_path("README.md"), "");
/// ```
pub fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

/// Sort a listing directories first, then by name.
pub(crate) fn sort_listing(entries: &mut [DirEntry]) {
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_entry_name_from_path() {
        let entry = DirEntry::file("docs/guide/README.md");
        assert_eq!(entry.name, "README.md");
        assert!(!entry.is_dir);

        let entry = DirEntry::dir("docs");
        assert_eq!(entry.name, "docs");
        assert!(entry.is_dir);
    }

    #[test]
    fn test_node_content() {
        let node = Node::new("README", b"hello world".to_vec()).with_content_type("text/plain");
        assert_eq!(node.content(), b"hello world");
        assert_eq!(node.content_length(), 11);
        assert_eq!(node.content_type(), Some("text/plain"));
    }

    #[test]
    fn test_sort_listing_directories_first() {
        let mut entries = vec![
            DirEntry::file("b.txt"),
            DirEntry::dir("z"),
            DirEntry::file("a.txt"),
            DirEntry::dir("c"),
        ];
        sort_listing(&mut entries);

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "z", "a.txt", "b.txt"]);
    }
}
