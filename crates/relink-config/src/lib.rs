//! Configuration management for relink.
//!
//! Parses `relink.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8067
//!
//! [[redirect]]
//! prefix = "w"
//! destination = "https://example.org/"
//!
//! [jekyll]
//! prefix = "b"
//! site_dir = "site"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Optional fields override only when set; `redirects` are appended after
/// the configured rules.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Additional redirect rules from the command line.
    pub redirects: Vec<RedirectConfig>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "relink.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Prefix redirect rules.
    #[serde(rename = "redirect")]
    pub redirects: Vec<RedirectConfig>,
    /// Legacy Jekyll resolution (paths are relative strings from TOML).
    jekyll: Option<JekyllConfigRaw>,

    /// Resolved Jekyll configuration (set after loading).
    #[serde(skip)]
    pub jekyll_resolved: Option<JekyllConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8067,
        }
    }
}

/// One prefix redirect rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// URL prefix the rule applies to. Empty matches every path.
    pub prefix: String,
    /// Destination base URL. Empty redirects to the site root.
    pub destination: String,
}

/// Raw Jekyll section as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize)]
struct JekyllConfigRaw {
    prefix: String,
    site_dir: Option<String>,
}

/// Resolved Jekyll configuration with absolute paths.
#[derive(Debug, Clone)]
pub struct JekyllConfig {
    /// Routing prefix the short links live under.
    pub prefix: String,
    /// Jekyll site root containing `_posts`.
    pub site_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `relink.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values. The merged
    /// configuration is validated last, so rules added on the command line
    /// face the same checks as configured ones.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing
    /// fails, or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        self.redirects.extend(settings.redirects.iter().cloned());
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid
    /// values. Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_prefixes()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate redirect prefixes.
    ///
    /// Every mounted prefix must be unique once normalised, `[jekyll]`
    /// included: two handlers on one prefix would make the redirect target
    /// ambiguous. Braces are rejected because the router treats them as
    /// pattern syntax.
    fn validate_prefixes(&self) -> Result<(), ConfigError> {
        let jekyll_prefix = self.jekyll_resolved.as_ref().map(|j| j.prefix.as_str());
        let mut seen = HashSet::new();
        for prefix in self
            .redirects
            .iter()
            .map(|r| r.prefix.as_str())
            .chain(jekyll_prefix)
        {
            let normalized = prefix.trim_matches('/');
            if normalized.contains(['{', '}']) {
                return Err(ConfigError::Validation(format!(
                    "redirect prefix {normalized:?} must not contain '{{' or '}}'"
                )));
            }
            if !seen.insert(normalized.to_owned()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate redirect prefix {normalized:?}"
                )));
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// Validates that `site_dir` is provided when `[jekyll]` section exists.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.jekyll_resolved = match &self.jekyll {
            Some(jekyll) => {
                let site_dir = jekyll.site_dir.as_deref().ok_or_else(|| {
                    ConfigError::Validation(
                        "[jekyll] section requires site_dir to be set".to_owned(),
                    )
                })?;
                Some(JekyllConfig {
                    prefix: jekyll.prefix.clone(),
                    site_dir: config_dir.join(site_dir),
                })
            }
            None => None,
        };

        Ok(())
    }
}
