//! HTTP server for the relink redirect service.
//!
//! Serves two kinds of permanent redirects:
//! - prefix rewrites: requests under a configured prefix are sent to a
//!   destination base URL (`relink-rewrite`)
//! - legacy post ids: an opaque short code is resolved against an index
//!   built from a Jekyll site's posts (`relink-jekyll`)
//!
//! All redirect state is constructed once, before the listener accepts its
//! first request; construction failures abort startup. Request handling is
//! read-only and lock-free; nothing is mutated per request.
//!
//! # Quick Start
//!
//! ```ignore
//! use relink_server::{JekyllSettings, ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 8067,
//!         redirects: vec![("w".to_string(), "https://example.org/".to_string())],
//!         jekyll: Some(JekyllSettings {
//!             prefix: "b".to_string(),
//!             site_dir: "site".into(),
//!         }),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod mount;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use relink_jekyll::LegacyIndex;
use relink_rewrite::RedirectRule;

pub use error::ServerError;
pub use mount::PrefixRouter;

use handlers::legacy::LegacyRedirect;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Prefix rewrite rules as `(prefix, destination)` pairs.
    pub redirects: Vec<(String, String)>,
    /// Legacy post-id resolution settings (`None` disables the handler).
    pub jekyll: Option<JekyllSettings>,
}

/// Settings for the legacy post-id handler.
#[derive(Clone, Debug)]
pub struct JekyllSettings {
    /// Routing prefix the short links live under.
    pub prefix: String,
    /// Jekyll site root containing `_posts`.
    pub site_dir: PathBuf,
}

/// Run the server.
///
/// Constructs every redirect rule and the legacy index before binding; any
/// construction failure is returned and nothing is served.
///
/// # Errors
///
/// Returns an error if a rule or the index cannot be constructed, or if the
/// listener fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let mut rules = Vec::with_capacity(config.redirects.len());
    for (prefix, destination) in &config.redirects {
        let rule = RedirectRule::new(prefix, destination)?;
        tracing::info!(prefix = %rule.prefix(), destination = %destination, "registered redirect");
        rules.push(Arc::new(rule));
    }

    let legacy = match &config.jekyll {
        Some(settings) => {
            let index = LegacyIndex::build(&settings.site_dir)?;
            tracing::info!(
                prefix = %settings.prefix,
                posts = index.len(),
                "built legacy post index"
            );
            Some(Arc::new(LegacyRedirect::new(&settings.prefix, index)))
        }
        None => None,
    };

    let app = app::create_router(rules, legacy);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from a loaded relink config.
#[must_use]
pub fn server_config_from_config(config: &relink_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        redirects: config
            .redirects
            .iter()
            .map(|r| (r.prefix.clone(), r.destination.clone()))
            .collect(),
        jekyll: config.jekyll_resolved.as_ref().map(|j| JekyllSettings {
            prefix: j.prefix.clone(),
            site_dir: j.site_dir.clone(),
        }),
    }
}
