//! HTTP request handlers.

pub(crate) mod legacy;
pub(crate) mod rewrite;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Build a 301 response pointing at `location`.
///
/// Redirects carry everything in the status line and `Location` header; no
/// body is written. A computed target that is not a valid header value
/// (unreachable for URI-derived input) answers 400 instead of panicking.
pub(crate) fn moved_permanently(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::warn!(location, "redirect target is not a valid header value");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}
