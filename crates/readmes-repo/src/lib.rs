//! Repository access for readmes.
//!
//! This crate provides a [`Repository`] trait that resolves a path and an
//! optional revision to file content or a directory listing. It keeps the
//! README pipeline independent of where files live.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Repository`] trait with `get_node()`, `list()` and `kind()` methods
//! - [`FsRepository`] for a plain directory (no revisions)
//! - [`GitRepository`] for git repositories, revisions resolved with rev-parse
//! - [`MockRepository`] for testing (behind `mock` feature flag)
//!
//! # Path Convention
//!
//! Paths are repository-relative, `/`-separated, without a leading slash.
//! The empty string is the repository root.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use readmes_repo::{FsRepository, Repository};
//!
//! let repo = FsRepository::new(PathBuf::from("."));
//! for entry in repo.list("", None)? {
//!     println!("{} (dir: {})", entry.path, entry.is_dir);
//! }
//! ```

mod error;
mod fs;
mod git;
#[cfg(feature = "mock")]
mod mock;
mod repository;

pub use error::{RepoError, RepoErrorKind};
pub use fs::FsRepository;
pub use git::GitRepository;
#[cfg(feature = "mock")]
pub use mock::MockRepository;
pub use repository::{DirEntry, Node, NodeKind, Repository, join_path, parent_path};
