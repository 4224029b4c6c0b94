//! CLI error types.

use relink_config::ConfigError;
use relink_jekyll::IndexError;
use relink_rewrite::RewriteError;
use relink_server::ServerError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Rewrite(#[from] RewriteError),

    #[error("{0}")]
    Index(#[from] IndexError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("{0}")]
    Validation(String),
}
