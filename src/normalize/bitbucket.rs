//
//  repo-aggregator
//  normalize/bitbucket.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket listing normalization.
//!
//! Bitbucket does not inline watcher and fork counts; each repository links
//! to a `watchers` and a `forks` collection whose `size` is the count. Two
//! extra calls per repository are therefore needed.
//!
//! ## Fan-out
//!
//! All lookups for one listing are started together on the current task and
//! awaited behind a single join barrier, so latency is bounded by the
//! slowest pair of calls rather than their sum. Every lookup runs to
//! completion; none are cancelled when a sibling fails.
//!
//! ## Retry
//!
//! If any lookup in the batch fails, the whole batch is retried exactly once
//! after [`FanOutPolicy::retry_delay`]. A second failure is reported as
//! [`ApiError::FanOut`].

use std::time::Duration;

use futures::future::join_all;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::api::bitbucket::{CollectionSize, Repository, RepositoryPage};
use crate::api::{ApiError, ProviderClient};

use super::{OrganizationSummary, RepositoryRecord};

/// Provider display name used in error messages.
pub const SITE: &str = "Bitbucket";

/// Delay before the single batch retry.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Retry behaviour for the watcher/fork fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOutPolicy {
    /// Fixed delay between the failed batch and its one retry.
    pub retry_delay: Duration,
}

impl Default for FanOutPolicy {
    fn default() -> Self {
        Self {
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Parses a validated `GET /repositories/{workspace}` body.
///
/// # Errors
///
/// Returns [`ApiError::MalformedPayload`] when the envelope or any listed
/// repository lacks a required field.
pub fn parse_listing(body: &str) -> Result<RepositoryPage, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::malformed(SITE, &e))
}

/// Resolves watcher and fork counts for every listed repository and reduces
/// the result into a summary.
///
/// Only the first page of the listing is used.
pub async fn normalize(
    client: &ProviderClient,
    page: RepositoryPage,
    policy: FanOutPolicy,
) -> Result<OrganizationSummary, ApiError> {
    if page.has_next() {
        debug!(
            "Bitbucket listing has further pages; using the first {} repositories",
            page.values.len()
        );
    }

    let repos = page.values;
    let records = match resolve_all(client, &repos).await {
        Ok(records) => records,
        Err(first) => {
            warn!(
                "Bitbucket fan-out failed ({}); retrying in {:?}",
                first, policy.retry_delay
            );
            tokio::time::sleep(policy.retry_delay).await;
            resolve_all(client, &repos)
                .await
                .map_err(|second| ApiError::FanOut(second.to_string()))?
        }
    };

    Ok(OrganizationSummary::from_repos(records))
}

async fn resolve_all(
    client: &ProviderClient,
    repos: &[Repository],
) -> Result<Vec<RepositoryRecord>, ApiError> {
    join_all(repos.iter().map(|repo| resolve_repo(client, repo)))
        .await
        .into_iter()
        .collect()
}

async fn resolve_repo(
    client: &ProviderClient,
    repo: &Repository,
) -> Result<RepositoryRecord, ApiError> {
    let (watchers, forks) = tokio::join!(
        collection_size(client, &repo.links.watchers.href),
        collection_size(client, &repo.links.forks.href),
    );

    Ok(RepositoryRecord {
        name: repo.name.clone(),
        language: repo.language.clone(),
        topic: repo.description.clone(),
        watchers: watchers?,
        forks: forks?,
    })
}

async fn collection_size(client: &ProviderClient, href: &str) -> Result<u64, ApiError> {
    let response = client.get_url(href).await?;
    if response.status() != StatusCode::OK {
        return Err(ApiError::upstream(&response));
    }

    let body = response.text().await?;
    let size: CollectionSize =
        serde_json::from_str(&body).map_err(|e| ApiError::malformed(SITE, &e))?;
    Ok(size.size)
}
