//! Configuration file support for vitrine.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `VITRINE_`, e.g., `VITRINE_GITHUB_TOKEN`)
//! 3. Config file (~/.config/vitrine/config.toml or ./vitrine.toml)
//! 4. Built-in defaults
//!
//! The unprefixed `GITHUB_USERNAME` and `GITHUB_TOKEN` environment variables
//! are honored as a fallback so the tool drops into existing CI setups.
//!
//! Example config file:
//! ```toml
//! [github]
//! username = "octocat"
//! token = "ghp_..."  # or use VITRINE_GITHUB_TOKEN env var
//!
//! [output]
//! dir = "public"
//!
//! [fetch]
//! concurrency = 6
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Fetch tuning.
    pub fetch: FetchConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub login whose footprint is aggregated.
    pub username: Option<String>,
    /// GitHub API token. Required; the pinned-items query is GraphQL and
    /// GraphQL always needs authentication.
    pub token: Option<String>,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the JSON artifacts are written into.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public"),
        }
    }
}

/// Fetch tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum concurrent per-repository language lookups.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: vitrine::aggregate::LANGUAGE_FANOUT,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/vitrine/config.toml)
    /// 3. Local config file (./vitrine.toml)
    /// 4. Environment variables with VITRINE_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "vitrine") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let local_config = PathBuf::from("vitrine.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./vitrine.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g., VITRINE_GITHUB_TOKEN -> github.token
        builder = builder.add_source(
            Environment::with_prefix("VITRINE")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub username, falling back to the legacy unprefixed
    /// environment variable.
    pub fn github_username(&self) -> Option<String> {
        self.github
            .username
            .clone()
            .or_else(|| std::env::var("GITHUB_USERNAME").ok())
    }

    /// Get the GitHub token, falling back to the legacy unprefixed
    /// environment variable.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }
}
