//! Redirect rule construction and target composition.

use http::Uri;
use http::uri::InvalidUri;

/// Error constructing a [`RedirectRule`].
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// The destination is not a parseable URL.
    #[error("invalid destination URL {destination:?}: {source}")]
    InvalidDestination {
        /// The destination string as configured.
        destination: String,
        source: InvalidUri,
    },
}

/// A single prefix-to-destination redirect rule.
///
/// The prefix is normalised to carry no leading or trailing slashes; an
/// empty prefix matches every path. The destination may be an absolute URL,
/// a relative reference such as `/a/`, or empty, which means "site root".
#[derive(Debug, Clone)]
pub struct RedirectRule {
    prefix: String,
    destination: Option<Uri>,
}

impl RedirectRule {
    /// Create a rule from a prefix and a destination base URL.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::InvalidDestination`] when a non-empty
    /// destination does not parse as a URL.
    pub fn new(prefix: &str, destination: &str) -> Result<Self, RewriteError> {
        let destination = if destination.is_empty() {
            None
        } else {
            let uri =
                destination
                    .parse::<Uri>()
                    .map_err(|source| RewriteError::InvalidDestination {
                        destination: destination.to_owned(),
                        source,
                    })?;
            Some(uri)
        };

        Ok(Self {
            prefix: prefix.trim_matches('/').to_owned(),
            destination,
        })
    }

    /// The normalised prefix. Empty matches every path.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Compute the redirect target for an incoming request path and query.
    ///
    /// Callers pass the request's path and query only; the scheme and host
    /// of an absolute-form request URI do not participate.
    ///
    /// The remainder after the prefix decides the shape of the result:
    /// - empty or `/`: the destination stands as configured
    /// - otherwise, a destination path with a trailing slash is a directory
    ///   the remainder is appended under, while one without a trailing slash
    ///   is replaced by the remainder entirely (scheme and host are kept)
    #[must_use]
    pub fn target(&self, path: &str, query: Option<&str>) -> String {
        let remainder = self.strip_prefix(path);

        let mut target = match &self.destination {
            None => {
                if remainder.is_empty() {
                    "/".to_owned()
                } else {
                    remainder.to_owned()
                }
            }
            Some(destination) => {
                let base = destination.path();
                if remainder.is_empty() || remainder == "/" {
                    render(destination, base)
                } else if let Some(dir) = base.strip_suffix('/') {
                    render(destination, &format!("{dir}{remainder}"))
                } else {
                    render(destination, remainder)
                }
            }
        };

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            target.push('?');
            target.push_str(query);
        }
        target
    }

    /// Remainder of `path` after the prefix segment.
    ///
    /// The remainder is empty or begins with `/`; a path that merely shares
    /// the prefix as a substring (`/xy` for prefix `x`) is left untouched.
    fn strip_prefix<'a>(&self, path: &'a str) -> &'a str {
        if self.prefix.is_empty() {
            return path;
        }
        let stripped = path
            .strip_prefix('/')
            .and_then(|p| p.strip_prefix(self.prefix.as_str()));
        match stripped {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    }
}

/// Rebuild a target URL from the destination's scheme and authority plus a
/// replacement path. The destination's own query never survives; the
/// request's query is appended by the caller.
fn render(destination: &Uri, path: &str) -> String {
    let mut out = String::new();
    if let Some(scheme) = destination.scheme_str() {
        out.push_str(scheme);
        out.push_str("://");
    } else if destination.authority().is_some() {
        out.push_str("//");
    }
    if let Some(authority) = destination.authority() {
        out.push_str(authority.as_str());
    }
    out.push_str(path);
    out
}
