//! Mock repository implementation for testing.
//!
//! Provides [`MockRepository`] for unit testing without filesystem access.

use std::collections::HashMap;

use crate::error::{RepoError, RepoErrorKind};
use crate::repository::{DirEntry, Node, NodeKind, Repository, parent_path};

const BACKEND: &str = "Mock";

#[derive(Debug, Clone)]
struct MockEntry {
    entry: DirEntry,
    content_type: Option<String>,
    content: Vec<u8>,
    failure: Option<RepoErrorKind>,
}

/// Mock repository for testing.
///
/// Entries are listed in the order they were added. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use readmes_repo::{MockRepository, Repository};
///
/// let repo = MockRepository::new()
///     .with_file("README.md", "# Hello")
///     .with_dir("docs");
///
/// let entries = repo.list("", None).unwrap();
/// let node = repo.get_node("README.md", None).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockRepository {
    entries: Vec<MockEntry>,
    revisions: HashMap<(String, String), Vec<u8>>,
}

impl MockRepository {
    /// Create a new empty mock repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file without a declared content type.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.push(DirEntry::file(path), None, content.into(), None)
    }

    /// Add a file with a declared content type.
    #[must_use]
    pub fn with_typed_file(
        self,
        path: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.push(
            DirEntry::file(path),
            Some(content_type.into()),
            content.into(),
            None,
        )
    }

    /// Add a directory.
    #[must_use]
    pub fn with_dir(self, path: impl Into<String>) -> Self {
        self.push(DirEntry::dir(path), None, Vec::new(), None)
    }

    /// Add a file that is listed but fails with `kind` when read.
    #[must_use]
    pub fn with_failing_file(self, path: impl Into<String>, kind: RepoErrorKind) -> Self {
        self.push(DirEntry::file(path), None, Vec::new(), Some(kind))
    }

    /// Override the content of an existing file at a specific revision.
    #[must_use]
    pub fn with_revision(
        mut self,
        revision: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.revisions
            .insert((revision.into(), path.into()), content.into());
        self
    }

    fn push(
        mut self,
        entry: DirEntry,
        content_type: Option<String>,
        content: Vec<u8>,
        failure: Option<RepoErrorKind>,
    ) -> Self {
        self.entries.push(MockEntry {
            entry,
            content_type,
            content,
            failure,
        });
        self
    }

    fn find(&self, path: &str) -> Option<&MockEntry> {
        self.entries.iter().find(|e| e.entry.path == path)
    }
}

impl Repository for MockRepository {
    fn get_node(&self, path: &str, revision: Option<&str>) -> Result<Node, RepoError> {
        let entry = self
            .find(path)
            .ok_or_else(|| RepoError::not_found(path).with_backend(BACKEND))?;
        if entry.entry.is_dir {
            return Err(RepoError::new(RepoErrorKind::NotAFile)
                .with_path(path)
                .with_backend(BACKEND));
        }
        if let Some(kind) = entry.failure {
            return Err(RepoError::new(kind).with_path(path).with_backend(BACKEND));
        }

        let content = revision
            .and_then(|rev| self.revisions.get(&(rev.to_owned(), path.to_owned())))
            .unwrap_or(&entry.content)
            .clone();
        let node = Node::new(path, content);
        Ok(match &entry.content_type {
            Some(content_type) => node.with_content_type(content_type.clone()),
            None => node,
        })
    }

    fn list(&self, path: &str, _revision: Option<&str>) -> Result<Vec<DirEntry>, RepoError> {
        if self.kind(path, None)? != NodeKind::Directory {
            return Err(RepoError::new(RepoErrorKind::NotADirectory)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(self
            .entries
            .iter()
            .filter(|e| parent_path(&e.entry.path) == path)
            .map(|e| e.entry.clone())
            .collect())
    }

    fn kind(&self, path: &str, _revision: Option<&str>) -> Result<NodeKind, RepoError> {
        if path.is_empty() {
            return Ok(NodeKind::Directory);
        }
        match self.find(path) {
            Some(e) if e.entry.is_dir => Ok(NodeKind::Directory),
            Some(_) => Ok(NodeKind::File),
            None => Err(RepoError::not_found(path).with_backend(BACKEND)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mock_repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockRepository>();
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let repo = MockRepository::new()
            .with_file("README.md", "a")
            .with_dir("docs")
            .with_file("docs/README", "b")
            .with_file("readme.wiki", "c");

        assert_eq!(
            repo.list("", None).unwrap(),
            vec![
                DirEntry::file("README.md"),
                DirEntry::dir("docs"),
                DirEntry::file("readme.wiki"),
            ]
        );
        assert_eq!(
            repo.list("docs", None).unwrap(),
            vec![DirEntry::file("docs/README")]
        );
    }

    #[test]
    fn test_get_node_content_type() {
        let repo = MockRepository::new().with_typed_file("README", "text/x-rst", "Title");

        let node = repo.get_node("README", None).unwrap();
        assert_eq!(node.content_type(), Some("text/x-rst"));
        assert_eq!(node.content(), b"Title");
    }

    #[test]
    fn test_get_node_failure() {
        let repo = MockRepository::new().with_failing_file("README", RepoErrorKind::Unavailable);

        let err = repo.get_node("README", None).unwrap_err();
        assert_eq!(err.kind, RepoErrorKind::Unavailable);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_get_node_at_revision() {
        let repo = MockRepository::new()
            .with_file("README", "new")
            .with_revision("1", "README", "old");

        assert_eq!(repo.get_node("README", None).unwrap().content(), b"new");
        assert_eq!(repo.get_node("README", Some("1")).unwrap().content(), b"old");
        assert_eq!(repo.get_node("README", Some("2")).unwrap().content(), b"new");
    }

    #[test]
    fn test_list_file_is_error() {
        let repo = MockRepository::new().with_file("README", "x");

        let err = repo.list("README", None).unwrap_err();
        assert_eq!(err.kind, RepoErrorKind::NotADirectory);
    }
}
