//! `relink serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use relink_config::{CliSettings, Config, RedirectConfig};
use relink_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover relink.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Additional redirect rule as PREFIX=DESTINATION (repeatable).
    /// An empty destination redirects to the site root.
    #[arg(short, long = "redirect", value_name = "PREFIX=DESTINATION")]
    redirects: Vec<String>,

    /// Enable verbose output (log registered redirects and requests).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            redirects: parse_redirect_args(&self.redirects)?,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Print startup info
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Redirect rules: {}", config.redirects.len()));
        if let Some(jekyll) = &config.jekyll_resolved {
            output.info(&format!(
                "Legacy posts: /{} -> {}",
                jekyll.prefix.trim_matches('/'),
                jekyll.site_dir.display()
            ));
        } else {
            output.info("Legacy posts: disabled (no [jekyll] in config)");
        }

        let server_config = server_config_from_config(&config);
        run_server(server_config).await?;

        Ok(())
    }
}

/// Parse `PREFIX=DESTINATION` rule arguments.
fn parse_redirect_args(args: &[String]) -> Result<Vec<RedirectConfig>, CliError> {
    args.iter()
        .map(|arg| {
            let (prefix, destination) = arg.split_once('=').ok_or_else(|| {
                CliError::Validation(format!(
                    "invalid redirect {arg:?}: expected PREFIX=DESTINATION"
                ))
            })?;
            Ok(RedirectConfig {
                prefix: prefix.to_owned(),
                destination: destination.to_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_redirect_args() {
        let rules = parse_redirect_args(&[
            "w=https://example.org/".to_owned(),
            "old=".to_owned(),
        ])
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].prefix, "w");
        assert_eq!(rules[0].destination, "https://example.org/");
        assert_eq!(rules[1].prefix, "old");
        assert_eq!(rules[1].destination, "");
    }

    #[test]
    fn test_parse_redirect_args_destination_may_contain_equals() {
        let rules = parse_redirect_args(&["s=https://example.org/?q=1".to_owned()]).unwrap();
        assert_eq!(rules[0].destination, "https://example.org/?q=1");
    }

    #[test]
    fn test_parse_redirect_args_rejects_missing_separator() {
        let err = parse_redirect_args(&["nodestination".to_owned()]).unwrap_err();
        assert!(err.to_string().contains("PREFIX=DESTINATION"));
    }
}
