//! `relink check` command implementation.
//!
//! Runs the same construction path as `serve` - rule parsing and legacy
//! index building - without binding a listener, so configuration problems
//! surface before deployment.

use std::path::PathBuf;

use clap::Args;
use relink_config::Config;
use relink_jekyll::LegacyIndex;
use relink_rewrite::RedirectRule;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover relink.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a destination URL
    /// does not parse, or the legacy index cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;

        for redirect in &config.redirects {
            let rule = RedirectRule::new(&redirect.prefix, &redirect.destination)?;
            let destination = if redirect.destination.is_empty() {
                "/"
            } else {
                redirect.destination.as_str()
            };
            output.info(&format!("redirect /{} -> {destination}", rule.prefix()));
        }

        if let Some(jekyll) = &config.jekyll_resolved {
            let index = LegacyIndex::build(&jekyll.site_dir)?;
            if index.is_empty() {
                output.warning(&format!(
                    "no posts under {} carry a legacy id",
                    jekyll.site_dir.display()
                ));
            } else {
                output.info(&format!("legacy index: {} posts", index.len()));
            }
        }

        output.success("Configuration OK");
        Ok(())
    }
}
