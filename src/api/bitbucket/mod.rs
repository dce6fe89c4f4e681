//
//  repo-aggregator
//  api/bitbucket/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 payload types.
//!
//! # Endpoints
//!
//! - `GET /repositories/{workspace}` returns a [`PaginatedResponse`] of
//!   [`Repository`] values.
//! - Each repository links to its `watchers` and `forks` collections. Those
//!   are paginated too; their `size` field is the count.
//!
//! # Notes
//!
//! - Bitbucket reports an unknown language as an empty string. It is mapped
//!   to `None` so it never shows up as a language label.

use serde::{Deserialize, Deserializer};

use crate::api::common::{Link, PaginatedResponse};

/// Path of the workspace repository listing.
pub fn workspace_repos_path(workspace: &str) -> String {
    format!("/repositories/{}", workspace)
}

/// Repository listing envelope for a workspace.
pub type RepositoryPage = PaginatedResponse<Repository>;

/// A repository within a workspace listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Human-readable name of the repository.
    pub name: String,

    /// Primary language; empty strings become `None`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub language: Option<String>,

    /// Optional description of the repository's purpose.
    #[serde(default)]
    pub description: Option<String>,

    /// Hyperlinks to related resources.
    pub links: RepositoryLinks,
}

/// The subset of repository links the normalizer follows.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryLinks {
    /// Link to the watchers collection.
    pub watchers: Link,

    /// Link to the forks collection.
    pub forks: Link,
}

/// The `size` of a linked collection (watchers or forks).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CollectionSize {
    /// Total number of items in the collection.
    pub size: u64,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
