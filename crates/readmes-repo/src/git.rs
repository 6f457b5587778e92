//! Git repository implementation.
//!
//! Provides [`GitRepository`], which reads trees and blobs straight from the
//! object database. Revisions are anything `git rev-parse` understands;
//! `None` means `HEAD`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use git2::{ErrorCode, ObjectType};

use crate::error::{RepoError, RepoErrorKind};
use crate::repository::{DirEntry, Node, NodeKind, Repository, join_path, sort_listing};

/// Backend identifier for error messages.
const BACKEND: &str = "Git";

/// Revision used when none is requested.
const DEFAULT_REVISION: &str = "HEAD";

/// Git-backed repository.
pub struct GitRepository {
    root: PathBuf,
    repo: Mutex<git2::Repository>,
}

impl GitRepository {
    /// Open the git repository containing `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] if no repository can be opened.
    pub fn open(path: &Path) -> Result<Self, RepoError> {
        let repo = git2::Repository::discover(path).map_err(|e| git_error(e, ""))?;
        let root = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();
        tracing::debug!(root = %root.display(), "Opened git repository");
        Ok(Self {
            root,
            repo: Mutex::new(repo),
        })
    }

    /// Working directory (or git directory for bare repositories).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run `f` with the repository and the tree at `revision`.
    fn with_tree<T>(
        &self,
        path: &str,
        revision: Option<&str>,
        f: impl FnOnce(&git2::Repository, &git2::Tree<'_>) -> Result<T, RepoError>,
    ) -> Result<T, RepoError> {
        let repo = self.repo.lock().map_err(|_| {
            RepoError::new(RepoErrorKind::Unavailable)
                .with_path(path)
                .with_backend(BACKEND)
        })?;
        let spec = revision.unwrap_or(DEFAULT_REVISION);
        let tree = repo
            .revparse_single(spec)
            .and_then(|object| object.peel_to_tree())
            .map_err(|e| {
                RepoError::new(RepoErrorKind::InvalidRevision)
                    .with_path(path)
                    .with_revision(spec)
                    .with_backend(BACKEND)
                    .with_source(e)
            })?;
        f(&repo, &tree).map_err(|e| match revision {
            Some(rev) => e.with_revision(rev),
            None => e,
        })
    }
}

impl Repository for GitRepository {
    fn get_node(&self, path: &str, revision: Option<&str>) -> Result<Node, RepoError> {
        self.with_tree(path, revision, |repo, tree| {
            let entry = tree
                .get_path(Path::new(path))
                .map_err(|e| git_error(e, path))?;
            if entry.kind() != Some(ObjectType::Blob) {
                return Err(RepoError::new(RepoErrorKind::NotAFile)
                    .with_path(path)
                    .with_backend(BACKEND));
            }
            let blob = entry
                .to_object(repo)
                .and_then(|object| object.peel_to_blob())
                .map_err(|e| git_error(e, path))?;
            Ok(Node::new(path, blob.content().to_vec()))
        })
    }

    fn list(&self, path: &str, revision: Option<&str>) -> Result<Vec<DirEntry>, RepoError> {
        self.with_tree(path, revision, |repo, tree| {
            let subtree;
            let dir = if path.is_empty() {
                tree
            } else {
                let entry = tree
                    .get_path(Path::new(path))
                    .map_err(|e| git_error(e, path))?;
                if entry.kind() != Some(ObjectType::Tree) {
                    return Err(RepoError::new(RepoErrorKind::NotADirectory)
                        .with_path(path)
                        .with_backend(BACKEND));
                }
                subtree = entry
                    .to_object(repo)
                    .and_then(|object| object.peel_to_tree())
                    .map_err(|e| git_error(e, path))?;
                &subtree
            };

            let mut entries: Vec<DirEntry> = dir
                .iter()
                .map(|entry| {
                    let name = String::from_utf8_lossy(entry.name_bytes()).into_owned();
                    DirEntry {
                        path: join_path(path, &name),
                        name,
                        is_dir: entry.kind() == Some(ObjectType::Tree),
                    }
                })
                .collect();
            sort_listing(&mut entries);
            Ok(entries)
        })
    }

    fn kind(&self, path: &str, revision: Option<&str>) -> Result<NodeKind, RepoError> {
        if path.is_empty() {
            // Resolving the tree validates the revision.
            return self.with_tree(path, revision, |_, _| Ok(NodeKind::Directory));
        }
        self.with_tree(path, revision, |_, tree| {
            let entry = tree
                .get_path(Path::new(path))
                .map_err(|e| git_error(e, path))?;
            Ok(if entry.kind() == Some(ObjectType::Tree) {
                NodeKind::Directory
            } else {
                NodeKind::File
            })
        })
    }
}

/// Map a git error to a repository error.
fn git_error(err: git2::Error, path: &str) -> RepoError {
    let kind = match err.code() {
        ErrorCode::NotFound => RepoErrorKind::NotFound,
        ErrorCode::InvalidSpec => RepoErrorKind::InvalidPath,
        _ => RepoErrorKind::Other,
    };
    RepoError::new(kind)
        .with_path(path)
        .with_backend(BACKEND)
        .with_source(err)
}
