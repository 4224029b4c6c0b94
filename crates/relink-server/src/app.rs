//! Router construction.
//!
//! Builds the axum router with every configured redirect mounted under its
//! prefix. Paths no rule claims fall through to axum's default 404.

use std::sync::Arc;

use axum::Router;
use relink_rewrite::RedirectRule;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::handlers::legacy::LegacyRedirect;
use crate::mount::PrefixRouter;

/// Create the application router.
///
/// # Arguments
///
/// * `rules` - prefix rewrite rules, one mount each
/// * `legacy` - legacy post-id handler, if configured
pub(crate) fn create_router(
    rules: Vec<Arc<RedirectRule>>,
    legacy: Option<Arc<LegacyRedirect>>,
) -> Router {
    let mut router = Router::new();

    for rule in rules {
        let prefix = rule.prefix().to_owned();
        router = router.route_prefix(&prefix, handlers::rewrite::routes(rule));
    }

    if let Some(legacy) = legacy {
        let prefix = legacy.prefix().to_owned();
        router = router.route_prefix(&prefix, handlers::legacy::routes(legacy));
    }

    router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
