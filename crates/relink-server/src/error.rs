//! Server error types.

use relink_jekyll::IndexError;
use relink_rewrite::RewriteError;

/// Error starting the server.
///
/// Every variant is a configuration-time failure: once the listener accepts
/// its first request, handlers no longer produce errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    Rewrite(#[from] RewriteError),

    #[error("{0}")]
    Index(#[from] IndexError),

    #[error("invalid listen address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
