//
//  repo-aggregator
//  api/github/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! GitHub REST API payload types.
//!
//! Only the fields the normalizer reads are modelled. Everything else in
//! the GitHub repository object is ignored during deserialization.
//!
//! # Endpoint
//!
//! `GET /orgs/{org}/repos` returns a flat JSON array of repositories
//! (first page only).

use serde::Deserialize;

/// Path of the organization repository listing.
pub fn org_repos_path(organization: &str) -> String {
    format!("/orgs/{}/repos", organization)
}

/// A repository as returned by `GET /orgs/{org}/repos`.
///
/// `name` and both counters are required; `language` and `description`
/// are `null` on GitHub when unset.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Repository name (without the owner prefix).
    pub name: String,

    /// Primary language detected by GitHub.
    #[serde(default)]
    pub language: Option<String>,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Number of watchers (stargazers on the current API).
    pub watchers_count: u64,

    /// Number of forks.
    pub forks_count: u64,
}
