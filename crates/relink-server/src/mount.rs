//! Prefix-based route registration.

use axum::Router;
use axum::routing::MethodRouter;

/// A router that can mount a handler under a path prefix.
///
/// Mounting at `x` matches `/x`, `/x/`, and any deeper sub-path, but never a
/// sibling such as `/xy` that merely shares the prefix text. An empty prefix
/// matches every path.
pub trait PrefixRouter {
    /// Register `handler` for the prefix itself and its whole subtree.
    #[must_use]
    fn route_prefix(self, prefix: &str, handler: MethodRouter) -> Self;
}

impl PrefixRouter for Router {
    fn route_prefix(self, prefix: &str, handler: MethodRouter) -> Self {
        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            return self.route("/", handler.clone()).route("/{*rest}", handler);
        }
        self.route(&format!("/{prefix}"), handler.clone())
            .route(&format!("/{prefix}/"), handler.clone())
            .route(&format!("/{prefix}/{{*rest}}"), handler)
    }
}
