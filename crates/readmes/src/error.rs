//! CLI error types.

use readmes_browser::PermissionDenied;
use readmes_config::ConfigError;
use readmes_render::RenderError;
use readmes_repo::RepoError;
use readmes_tree::TreeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Repository(#[from] RepoError),

    #[error("Invalid page: {0}")]
    Page(#[from] TreeError),

    #[error("{0}")]
    Permission(#[from] PermissionDenied),

    #[error("{0}")]
    Render(#[from] RenderError),
}
