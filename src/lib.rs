//
//  repo-aggregator
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Aggregator Library
//!
//! A small REST service that fetches organization repository metadata from
//! GitHub and Bitbucket, normalizes both shapes into a common summary, and
//! merges totals across the two providers.
//!
//! ## Overview
//!
//! Every inbound request flows one way:
//!
//! ```text
//! request -> provider client call(s) -> validation -> typed parse
//!         -> normalization -> (optional) merge -> JSON response
//! ```
//!
//! Nothing is cached or persisted; all records are rebuilt per request.
//!
//! ## Module Structure
//!
//! - [`api`]: Provider HTTP client, typed provider payloads, response validation
//! - [`auth`]: Bitbucket OAuth 2.0 client-credentials exchange and bearer credential
//! - [`normalize`]: Repository records, organization summaries, merge aggregation
//! - [`provider`]: The [`OrganizationProvider`] seam joining clients and normalizers
//! - [`server`]: actix-web routes, handlers and error mapping
//! - [`config`]: Layered configuration (defaults, TOML file, environment, flags)
//! - [`cli`]: Command-line arguments for the server binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use repo_aggregator::normalize::{merge, OrganizationSummary, RepositoryRecord};
//!
//! let github = OrganizationSummary::from_repos(vec![RepositoryRecord {
//!     name: "a".to_string(),
//!     language: Some("Go".to_string()),
//!     topic: None,
//!     watchers: 5,
//!     forks: 1,
//! }]);
//! let bitbucket = OrganizationSummary::from_repos(Vec::new());
//!
//! let totals = merge(&github, &bitbucket);
//! assert_eq!(totals.total_repos, 1);
//! ```

/// Outbound provider access.
///
/// Contains the [`api::ProviderClient`] used for both GitHub and Bitbucket,
/// the typed raw payloads each provider returns, and the response validator
/// that gates every body before it is parsed.
pub mod api;

/// Bitbucket authentication.
///
/// Exchanges configured client credentials for a bearer token once at
/// startup. The resulting credential is shared read-only for the process
/// lifetime and is never refreshed.
pub mod auth;

/// Command-line interface definitions for the server binary.
pub mod cli;

/// Layered configuration management.
///
/// Defaults are overridden by an optional TOML file, which is in turn
/// overridden by environment variables and command-line flags.
pub mod config;

/// Response normalization.
///
/// Converts provider listings into [`normalize::RepositoryRecord`]s, reduces
/// them into [`normalize::OrganizationSummary`]s and merges two summaries.
pub mod normalize;

/// Provider abstraction used by the request handlers.
pub mod provider;

/// HTTP surface.
///
/// Route configuration, request handlers, shared application state and the
/// mapping from [`api::ApiError`] to HTTP responses.
pub mod server;

pub use api::{ApiError, ProviderClient};
pub use config::Config;
pub use provider::OrganizationProvider;

/// Application name constant.
///
/// Used for the `User-Agent` header and configuration paths.
pub const APP_NAME: &str = "repo-aggregator";

/// Application version constant, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the server binary.
///
/// # Exit Code Ranges
///
/// - `0`: Clean shutdown
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
pub mod exit_codes {
    /// Clean shutdown.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// The server failed to bind or stopped with an I/O error.
    pub const ERROR: i32 = 1;

    /// Invalid configuration.
    ///
    /// A configuration value could not be parsed or a required pair of
    /// settings was only partially provided.
    pub const USAGE: i32 = 2;

    /// Bitbucket token exchange failed at startup.
    pub const AUTH_ERROR: i32 = 4;
}
