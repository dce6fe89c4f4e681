//
//  repo-aggregator
//  normalize/merge.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Merge aggregation of two organization summaries.
//!
//! Totals are field-wise sums. Languages are concatenated GitHub first,
//! then Bitbucket, and are *not* deduplicated across providers: a language
//! used on both providers appears twice.

use serde::{Deserialize, Serialize};

use super::OrganizationSummary;

/// Combined totals for one organization across both providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedSummary {
    /// `github.repo_count + bitbucket.repo_count`.
    pub total_repos: u64,

    /// GitHub languages followed by Bitbucket languages.
    pub languages: Vec<String>,

    /// `github.fork_count + bitbucket.fork_count`.
    pub total_forks: u64,

    /// `github.watcher_count + bitbucket.watcher_count`.
    pub total_watchers: u64,
}

/// Body of the merged lookup: totals first, then each provider's summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedReport {
    /// Combined totals.
    #[serde(rename = "Merged Totals")]
    pub totals: MergedSummary,

    /// GitHub summary.
    #[serde(rename = "GitHub")]
    pub github: OrganizationSummary,

    /// Bitbucket summary.
    #[serde(rename = "Bitbucket")]
    pub bitbucket: OrganizationSummary,
}

impl MergedReport {
    /// Merges the two summaries and keeps them alongside the totals.
    pub fn new(github: OrganizationSummary, bitbucket: OrganizationSummary) -> Self {
        Self {
            totals: merge(&github, &bitbucket),
            github,
            bitbucket,
        }
    }
}

/// Combines two already-normalized summaries. Pure; performs no I/O.
///
/// # Example
///
/// ```rust
/// use repo_aggregator::normalize::{merge, OrganizationSummary};
///
/// let empty = OrganizationSummary::from_repos(Vec::new());
/// let totals = merge(&empty, &empty);
/// assert_eq!(totals.total_repos, 0);
/// assert!(totals.languages.is_empty());
/// ```
pub fn merge(github: &OrganizationSummary, bitbucket: &OrganizationSummary) -> MergedSummary {
    MergedSummary {
        total_repos: github.repo_count + bitbucket.repo_count,
        languages: github
            .languages
            .iter()
            .chain(bitbucket.languages.iter())
            .cloned()
            .collect(),
        total_forks: github.fork_count + bitbucket.fork_count,
        total_watchers: github.watcher_count + bitbucket.watcher_count,
    }
}
