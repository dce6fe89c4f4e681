//
//  repo-aggregator
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI argument definitions using clap derive macros
//!
//! Every setting can come from a flag or its environment variable. Values
//! given here override whatever the configuration file set.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Repository metadata aggregation service
#[derive(Parser, Debug, Default)]
#[command(
    name = "repo-aggregator",
    version,
    about = "Aggregate repository metadata from GitHub and Bitbucket",
    long_about = "repo-aggregator serves a small JSON API that summarizes the repositories\n\
                  of an organization on GitHub, on Bitbucket, or on both merged together.",
    after_help = "Routes: /health, /github/{org}/, /bitbucket/{org}/, /merged/?org=NAME"
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short = 'c', env = "AGGREGATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "AGGREGATOR_HOST")]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long, short = 'p', env = "AGGREGATOR_PORT")]
    pub port: Option<u16>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,

    /// Bitbucket API base URL
    #[arg(long, env = "BITBUCKET_API_URL")]
    pub bitbucket_api_url: Option<String>,

    /// Bitbucket OAuth token endpoint
    #[arg(long, env = "BITBUCKET_TOKEN_URL")]
    pub bitbucket_token_url: Option<String>,

    /// Bitbucket OAuth consumer key
    #[arg(long, env = "BITBUCKET_CLIENT_ID")]
    pub bitbucket_client_id: Option<String>,

    /// Bitbucket OAuth consumer secret
    #[arg(long, env = "BITBUCKET_CLIENT_SECRET", hide_env_values = true)]
    pub bitbucket_client_secret: Option<String>,

    /// Delay before retrying a failed Bitbucket fan-out, in milliseconds
    #[arg(long, env = "FANOUT_RETRY_DELAY_MS")]
    pub retry_delay_ms: Option<u64>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Layers the flag and environment values over `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.github_api_url {
            config.github.api_url = url.clone();
        }
        if let Some(url) = &self.bitbucket_api_url {
            config.bitbucket.api_url = url.clone();
        }
        if let Some(url) = &self.bitbucket_token_url {
            config.bitbucket.token_url = url.clone();
        }
        if let Some(id) = &self.bitbucket_client_id {
            config.bitbucket.client_id = Some(id.clone());
        }
        if let Some(secret) = &self.bitbucket_client_secret {
            config.bitbucket.client_secret = Some(secret.clone());
        }
        if let Some(delay) = self.retry_delay_ms {
            config.bitbucket.retry_delay_ms = delay;
        }
    }

    /// Loads the configuration file (if any) and applies overrides.
    pub fn resolve_config(&self) -> Result<Config, crate::config::ConfigError> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}
