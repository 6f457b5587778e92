//! Filesystem repository implementation.
//!
//! Provides [`FsRepository`] for serving a plain directory tree. The
//! filesystem has no history, so any explicit revision is rejected.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{RepoError, RepoErrorKind};
use crate::repository::{DirEntry, Node, NodeKind, Repository, join_path, sort_listing};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem repository rooted at a directory.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use readmes_repo::{FsRepository, Repository};
///
/// let repo = FsRepository::new(PathBuf::from("."));
/// let readme = repo.get_node("README.md", None)?;
/// ```
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
}

impl FsRepository {
    /// Create a repository rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a repository path to a filesystem path under the root.
    ///
    /// Rejects absolute paths and parent directory components (`..`) to
    /// prevent path traversal.
    fn resolve(&self, path: &str, revision: Option<&str>) -> Result<PathBuf, RepoError> {
        if let Some(rev) = revision {
            return Err(RepoError::new(RepoErrorKind::InvalidRevision)
                .with_path(path)
                .with_revision(rev)
                .with_backend(BACKEND));
        }

        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(RepoError::new(RepoErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }

        Ok(self.root.join(relative))
    }
}

impl Repository for FsRepository {
    fn get_node(&self, path: &str, revision: Option<&str>) -> Result<Node, RepoError> {
        let full_path = self.resolve(path, revision)?;
        let metadata =
            fs::metadata(&full_path).map_err(|e| RepoError::io(e, path).with_backend(BACKEND))?;
        if metadata.is_dir() {
            return Err(RepoError::new(RepoErrorKind::NotAFile)
                .with_path(path)
                .with_backend(BACKEND));
        }

        let content =
            fs::read(&full_path).map_err(|e| RepoError::io(e, path).with_backend(BACKEND))?;
        Ok(Node::new(path, content))
    }

    fn list(&self, path: &str, revision: Option<&str>) -> Result<Vec<DirEntry>, RepoError> {
        let full_path = self.resolve(path, revision)?;
        let read_dir =
            fs::read_dir(&full_path).map_err(|e| RepoError::io(e, path).with_backend(BACKEND))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| RepoError::io(e, path).with_backend(BACKEND))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks; fall back to the link itself when the target is gone.
            let is_dir = fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .or_else(|_| entry.file_type().map(|t| t.is_dir()))
                .unwrap_or(false);
            entries.push(DirEntry {
                path: join_path(path, &name),
                name,
                is_dir,
            });
        }

        sort_listing(&mut entries);
        Ok(entries)
    }

    fn kind(&self, path: &str, revision: Option<&str>) -> Result<NodeKind, RepoError> {
        let full_path = self.resolve(path, revision)?;
        let metadata =
            fs::metadata(&full_path).map_err(|e| RepoError::io(e, path).with_backend(BACKEND))?;
        Ok(if metadata.is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        })
    }
}
