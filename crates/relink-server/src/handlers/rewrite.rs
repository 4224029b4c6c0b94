//! Prefix rewrite handler.
//!
//! Wraps a [`RedirectRule`]: every request at or below the rule's prefix is
//! answered with a permanent redirect to the composed destination.

use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::response::Response;
use axum::routing::{MethodRouter, any};
use relink_rewrite::RedirectRule;

use crate::handlers::moved_permanently;

/// Routes for one rewrite rule, ready to mount with
/// [`PrefixRouter::route_prefix`](crate::PrefixRouter::route_prefix).
pub(crate) fn routes(rule: Arc<RedirectRule>) -> MethodRouter {
    any(redirect).with_state(rule)
}

/// Handle any method at or below the rule's prefix.
///
/// Only path and query of the request participate; scheme and host of an
/// absolute-form request URI are ignored by construction.
async fn redirect(State(rule): State<Arc<RedirectRule>>, uri: Uri) -> Response {
    moved_permanently(&rule.target(uri.path(), uri.query()))
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::mount::PrefixRouter;

    fn app(prefix: &str, destination: &str) -> Router {
        let rule = Arc::new(RedirectRule::new(prefix, destination).unwrap());
        Router::new().route_prefix(prefix, routes(rule))
    }

    async fn request(app: Router, uri: &str) -> (StatusCode, Option<String>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_owned());
        (response.status(), location)
    }

    #[tokio::test]
    async fn test_redirects_to_destination_root() {
        for (uri, want) in [
            ("/x", "http://example/"),
            ("/x/", "http://example/"),
            ("/x/y", "http://example/y"),
        ] {
            let (status, location) = request(app("x", "http://example/"), uri).await;
            assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
            assert_eq!(location.as_deref(), Some(want), "input {uri:?}");
        }
    }

    #[tokio::test]
    async fn test_preserves_query_string() {
        let (status, location) = request(app("x", "http://example/"), "/x/y?a=b").await;
        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location.as_deref(), Some("http://example/y?a=b"));
    }

    #[tokio::test]
    async fn test_destination_path_without_trailing_slash() {
        let (_, location) = request(app("x", "http://example/a"), "/x/y").await;
        assert_eq!(location.as_deref(), Some("http://example/y"));

        let (_, location) = request(app("x", "http://example/a"), "/x").await;
        assert_eq!(location.as_deref(), Some("http://example/a"));
    }

    #[tokio::test]
    async fn test_destination_path_with_trailing_slash() {
        let (_, location) = request(app("x", "http://example/a/"), "/x/y").await;
        assert_eq!(location.as_deref(), Some("http://example/a/y"));
    }

    #[tokio::test]
    async fn test_relative_destination() {
        let (_, location) = request(app("x", "/a/"), "/x/y").await;
        assert_eq!(location.as_deref(), Some("/a/y"));
    }

    #[tokio::test]
    async fn test_empty_destination_redirects_to_site_root() {
        let (_, location) = request(app("x", ""), "/x/y").await;
        assert_eq!(location.as_deref(), Some("/y"));

        let (_, location) = request(app("x", ""), "/x").await;
        assert_eq!(location.as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_sibling_path_is_not_matched() {
        let (status, location) = request(app("x", "http://example/"), "/xy").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(location, None);
    }

    #[tokio::test]
    async fn test_absolute_request_uri_uses_only_path_and_query() {
        let (status, location) =
            request(app("x", "http://example/"), "http://foo/x/y").await;
        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location.as_deref(), Some("http://example/y"));
    }
}
