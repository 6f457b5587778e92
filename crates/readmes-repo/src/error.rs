//! Repository error types.

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RepoErrorKind {
    /// Path does not exist at the requested revision.
    NotFound,
    /// Path exists but is a directory where a file was expected.
    NotAFile,
    /// Path exists but is a file where a directory was expected.
    NotADirectory,
    /// Backend refused access.
    PermissionDenied,
    /// Path escapes the repository or is malformed.
    InvalidPath,
    /// Revision cannot be resolved by this backend.
    InvalidRevision,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Repository error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct RepoError {
    /// Semantic error category.
    pub kind: RepoErrorKind,
    /// Repository path context (if applicable).
    pub path: Option<String>,
    /// Revision context (if applicable).
    pub revision: Option<String>,
    /// Backend identifier (e.g., "Fs", "Git", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RepoError {
    /// Create a new repository error.
    #[must_use]
    pub fn new(kind: RepoErrorKind) -> Self {
        Self {
            kind,
            path: None,
            revision: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach revision context.
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(RepoErrorKind::NotFound).with_path(path)
    }

    /// Create a repository error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => RepoErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => RepoErrorKind::PermissionDenied,
            std::io::ErrorKind::IsADirectory => RepoErrorKind::NotAFile,
            std::io::ErrorKind::NotADirectory => RepoErrorKind::NotADirectory,
            _ => RepoErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: foo/bar@rev)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            RepoErrorKind::NotFound => "Not found",
            RepoErrorKind::NotAFile => "Not a file",
            RepoErrorKind::NotADirectory => "Not a directory",
            RepoErrorKind::PermissionDenied => "Permission denied",
            RepoErrorKind::InvalidPath => "Invalid path",
            RepoErrorKind::InvalidRevision => "Invalid revision",
            RepoErrorKind::Unavailable => "Unavailable",
            RepoErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        match (&self.path, &self.revision) {
            (Some(path), Some(rev)) => write!(f, " (path: {path}@{rev})")?,
            (Some(path), None) => write!(f, " (path: {path})")?,
            (None, Some(rev)) => write!(f, " (revision: {rev})")?,
            (None, None) => {}
        }

        Ok(())
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_new() {
        let err = RepoError::new(RepoErrorKind::NotFound);

        assert_eq!(err.kind, RepoErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.revision.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_repo_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RepoError::new(RepoErrorKind::NotFound).with_source(io_err);

        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_repo_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = RepoError::io(io_err, "secret/README");

        assert_eq!(err.kind, RepoErrorKind::PermissionDenied);
        assert_eq!(err.path.as_deref(), Some("secret/README"));
    }

    #[test]
    fn test_repo_error_display_simple() {
        let err = RepoError::new(RepoErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_repo_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RepoError::new(RepoErrorKind::NotFound)
            .with_backend("Git")
            .with_path("docs/README.md")
            .with_revision("abc123")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Git] Not found: file not found (path: docs/README.md@abc123)"
        );
    }

    #[test]
    fn test_repo_error_display_revision_only() {
        let err = RepoError::new(RepoErrorKind::InvalidRevision)
            .with_backend("Fs")
            .with_revision("HEAD~1");

        assert_eq!(err.to_string(), "[Fs] Invalid revision (revision: HEAD~1)");
    }

    #[test]
    fn test_repo_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RepoError>();
    }
}
