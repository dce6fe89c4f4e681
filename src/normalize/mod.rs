//
//  repo-aggregator
//  normalize/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Normalization
//!
//! GitHub and Bitbucket describe repositories differently. This module
//! defines the common shapes both are converted into and the reductions
//! applied to them.
//!
//! ## Shapes
//!
//! | Type | Built from | Fields |
//! |------|-----------|--------|
//! | [`RepositoryRecord`] | one provider repository | name, language, topic, watchers, forks |
//! | [`OrganizationSummary`] | records of one provider | repos, repo_count, languages, fork_count, watcher_count |
//! | [`MergedSummary`] | two summaries | total_repos, languages, total_forks, total_watchers |
//!
//! ## Submodules
//!
//! - [`github`]: GitHub listing → summary (pure field mapping)
//! - [`bitbucket`]: Bitbucket listing → summary (concurrent sub-resource lookups)
//! - [`merge`]: summary + summary → merged totals

pub mod bitbucket;
pub mod github;
pub mod merge;

pub use merge::{merge, MergedReport, MergedSummary};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A provider repository in the common shape.
///
/// Records have no identity beyond the request that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Repository name.
    pub name: String,

    /// Primary language, `None` when the provider reports none.
    pub language: Option<String>,

    /// The provider's description text.
    pub topic: Option<String>,

    /// Watcher count.
    pub watchers: u64,

    /// Fork count.
    pub forks: u64,
}

/// Organization-level totals derived from a list of records.
///
/// # Invariants
///
/// - `repo_count == repos.len()`
/// - `fork_count` and `watcher_count` are sums over `repos`
/// - `languages` holds each non-null language once, in first-seen order
///
/// # Example
///
/// ```rust
/// use repo_aggregator::normalize::{OrganizationSummary, RepositoryRecord};
///
/// let record = |name: &str, language: Option<&str>| RepositoryRecord {
///     name: name.to_string(),
///     language: language.map(String::from),
///     topic: None,
///     watchers: 2,
///     forks: 1,
/// };
///
/// let summary = OrganizationSummary::from_repos(vec![
///     record("a", Some("Go")),
///     record("b", None),
///     record("c", Some("Go")),
/// ]);
///
/// assert_eq!(summary.repo_count, 3);
/// assert_eq!(summary.languages, vec!["Go".to_string()]);
/// assert_eq!(summary.watcher_count, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    /// Records in provider listing order.
    pub repos: Vec<RepositoryRecord>,

    /// Number of records.
    pub repo_count: u64,

    /// Distinct non-null languages.
    pub languages: Vec<String>,

    /// Sum of `forks` over all records.
    pub fork_count: u64,

    /// Sum of `watchers` over all records.
    pub watcher_count: u64,
}

impl OrganizationSummary {
    /// Reduces records into an organization summary.
    pub fn from_repos(repos: Vec<RepositoryRecord>) -> Self {
        let languages = distinct_languages(&repos);
        let fork_count = repos.iter().map(|r| r.forks).sum();
        let watcher_count = repos.iter().map(|r| r.watchers).sum();

        Self {
            repo_count: repos.len() as u64,
            languages,
            fork_count,
            watcher_count,
            repos,
        }
    }
}

fn distinct_languages(repos: &[RepositoryRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .filter(|lang| seen.insert(*lang))
        .map(String::from)
        .collect()
}
