//
//  repo-aggregator
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Configuration is assembled from three layers, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (explicit `--config` path, or the platform
//!    config directory when a file exists there)
//! 3. Environment variables and command-line flags (see [`crate::cli`])
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/repo-aggregator/config.toml`
//! - **macOS**: `~/Library/Application Support/repo-aggregator/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\repo-aggregator\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [github]
//! api_url = "https://api.github.com"
//!
//! [bitbucket]
//! api_url = "https://api.bitbucket.org/2.0"
//! token_url = "https://bitbucket.org/site/oauth2/access_token"
//! client_id = "consumer-key"
//! client_secret = "consumer-secret"
//! retry_delay_ms = 2000
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations

mod file;

pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::api::client::{BITBUCKET_API_URL, GITHUB_API_URL};
use crate::auth::TOKEN_URL;
use crate::normalize::bitbucket::{FanOutPolicy, DEFAULT_RETRY_DELAY};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`Config`].
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A URL setting does not parse.
    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Only one of the Bitbucket client id / secret pair is set.
    #[error("Bitbucket client id and client secret must be configured together")]
    IncompleteCredentials,
}

/// Complete service configuration.
///
/// # Examples
///
/// ```rust
/// use repo_aggregator::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.server.port, 5000);
/// assert!(config.bitbucket.credentials().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub provider settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Bitbucket provider settings.
    #[serde(default)]
    pub bitbucket: BitbucketConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// GitHub provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL.
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
}

fn default_github_api_url() -> String {
    GITHUB_API_URL.to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
        }
    }
}

/// Bitbucket provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitbucketConfig {
    /// API v2.0 base URL.
    #[serde(default = "default_bitbucket_api_url")]
    pub api_url: String,

    /// OAuth token endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// OAuth consumer key.
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth consumer secret.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Delay before the single fan-out retry, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_bitbucket_api_url() -> String {
    BITBUCKET_API_URL.to_string()
}

fn default_token_url() -> String {
    TOKEN_URL.to_string()
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY.as_millis() as u64
}

impl Default for BitbucketConfig {
    fn default() -> Self {
        Self {
            api_url: default_bitbucket_api_url(),
            token_url: default_token_url(),
            client_id: None,
            client_secret: None,
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl BitbucketConfig {
    /// Returns the client id and secret when both are set and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let id = self.client_id.as_deref().filter(|s| !s.is_empty())?;
        let secret = self.client_secret.as_deref().filter(|s| !s.is_empty())?;
        Some((id, secret))
    }

    /// Retry policy for the watcher/fork fan-out.
    pub fn fan_out_policy(&self) -> FanOutPolicy {
        FanOutPolicy {
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location.
    ///
    /// An explicit `path` must exist. Without one, a missing file at the
    /// default location is not an error; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_toml(&read_config_file(path)?),
            None => match Self::config_path() {
                Some(path) if config_exists(&path) => Self::from_toml(&read_config_file(&path)?),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parses a TOML document; absent sections and keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the platform-specific configuration file path, if a home
    /// directory can be determined.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Checks URLs and the credential pair.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("github.api_url", &self.github.api_url)?;
        check_url("bitbucket.api_url", &self.bitbucket.api_url)?;
        check_url("bitbucket.token_url", &self.bitbucket.token_url)?;

        let has_id = self.bitbucket.client_id.as_deref().is_some_and(|s| !s.is_empty());
        let has_secret = self
            .bitbucket
            .client_secret
            .as_deref()
            .is_some_and(|s| !s.is_empty());
        if has_id != has_secret {
            return Err(ConfigError::IncompleteCredentials);
        }

        Ok(())
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Renders the configuration as TOML with the client secret masked.
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        if shown.bitbucket.client_secret.is_some() {
            shown.bitbucket.client_secret = Some("********".to_string());
        }
        toml::to_string_pretty(&shown)
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}
