//! Legacy post-id handler.
//!
//! Wraps a [`LegacyIndex`]: the path segment after the prefix is looked up
//! verbatim, and known identifiers redirect to the post's permalink.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, any};
use relink_jekyll::LegacyIndex;

use crate::handlers::moved_permanently;

/// Legacy short-link resolution state: the routing prefix and the index
/// built from the site's posts. Owned by the handler that serves it and
/// read-only for the life of the process.
pub struct LegacyRedirect {
    prefix: String,
    index: LegacyIndex,
}

impl LegacyRedirect {
    /// Create a handler for `index` mounted at `prefix`.
    #[must_use]
    pub fn new(prefix: &str, index: LegacyIndex) -> Self {
        Self {
            prefix: prefix.trim_matches('/').to_owned(),
            index,
        }
    }

    /// The normalised routing prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Identifier segment of `path`: the remainder after the prefix, with
    /// surrounding slashes trimmed.
    fn id_segment<'a>(&self, path: &'a str) -> &'a str {
        path.strip_prefix('/')
            .and_then(|p| p.strip_prefix(self.prefix.as_str()))
            .unwrap_or(path)
            .trim_matches('/')
    }
}

/// Routes for the legacy handler, ready to mount with
/// [`PrefixRouter::route_prefix`](crate::PrefixRouter::route_prefix).
pub(crate) fn routes(legacy: Arc<LegacyRedirect>) -> MethodRouter {
    any(redirect).with_state(legacy)
}

/// Resolve the identifier against the index: 301 to the permalink when
/// known, 404 otherwise. An unknown identifier is an expected outcome, not
/// an error.
async fn redirect(State(legacy): State<Arc<LegacyRedirect>>, uri: Uri) -> Response {
    let id = legacy.id_segment(uri.path());
    match legacy.index.get(id) {
        Some(permalink) => moved_permanently(permalink),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::mount::PrefixRouter;

    fn site_with_post(site: &Path, name: &str, content: &str) {
        let posts = site.join("_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join(name), content).unwrap();
    }

    fn app(prefix: &str, index: LegacyIndex) -> Router {
        let legacy = Arc::new(LegacyRedirect::new(prefix, index));
        Router::new().route_prefix(prefix, routes(legacy))
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
    async fn test_known_id_redirects_to_permalink() {
        let dir = tempfile::tempdir().unwrap();
        site_with_post(
            dir.path(),
            "2014-05-28-test.md",
            "---\nwordpress_id: 100\n---\n",
        );
        let index = LegacyIndex::build(dir.path()).unwrap();

        let (status, location) = request(app("b", index), "/b/100").await;

        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location.as_deref(), Some("/2014/05/28/test.html"));
    }

    #[tokio::test]
    async fn test_unknown_id_answers_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("_posts")).unwrap();
        let index = LegacyIndex::build(dir.path()).unwrap();

        let (status, location) = request(app("b", index), "/b/100").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(location, None);
    }

    #[tokio::test]
    async fn test_bare_prefix_answers_not_found() {
        let dir = tempfile::tempdir().unwrap();
        site_with_post(
            dir.path(),
            "2014-05-28-test.md",
            "---\nwordpress_id: 100\n---\n",
        );
        let index = LegacyIndex::build(dir.path()).unwrap();
        let app = app("b", index);

        let (status, _) = request(app.clone(), "/b").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = request(app, "/b/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trailing_slash_after_id_still_resolves() {
        let dir = tempfile::tempdir().unwrap();
        site_with_post(
            dir.path(),
            "2014-05-28-test.md",
            "---\nwordpress_id: 100\n---\n",
        );
        let index = LegacyIndex::build(dir.path()).unwrap();

        let (status, location) = request(app("b", index), "/b/100/").await;

        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(location.as_deref(), Some("/2014/05/28/test.html"));
    }

    #[test]
    fn test_id_segment_extraction() {
        let legacy = LegacyRedirect::new("b", LegacyIndex::default());
        assert_eq!(legacy.id_segment("/b/1f"), "1f");
        assert_eq!(legacy.id_segment("/b/1f/"), "1f");
        assert_eq!(legacy.id_segment("/b"), "");
        assert_eq!(legacy.id_segment("/b/"), "");
    }
}
