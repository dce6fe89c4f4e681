//
//  repo-aggregator
//  provider/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Organization Providers
//!
//! A provider joins a [`ProviderClient`] with the normalizer for its
//! response shape. Handlers only see the [`OrganizationProvider`] trait, so
//! the clients are constructed once at startup and passed in explicitly.
//!
//! ## Flow per lookup
//!
//! 1. GET the organization listing
//! 2. [`validate_response`] (404 / other non-200 short-circuit here)
//! 3. Read the body and parse it into typed records
//! 4. Normalize into an [`OrganizationSummary`]

use async_trait::async_trait;
use tracing::debug;

use crate::api::common::validate_response;
use crate::api::{bitbucket, github, ApiError, ProviderClient};
use crate::normalize::bitbucket::FanOutPolicy;
use crate::normalize::{self, OrganizationSummary};

/// A source of organization summaries.
#[async_trait]
pub trait OrganizationProvider: Send + Sync {
    /// Provider display name used in messages (`Github`, `Bitbucket`).
    fn site(&self) -> &'static str;

    /// Fetches and normalizes the first page of an organization's repositories.
    async fn organization(&self, name: &str) -> Result<OrganizationSummary, ApiError>;
}

/// GitHub organizations via `GET /orgs/{org}/repos`.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    client: ProviderClient,
}

impl GitHubProvider {
    /// Wraps an unauthenticated GitHub client.
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrganizationProvider for GitHubProvider {
    fn site(&self) -> &'static str {
        normalize::github::SITE
    }

    async fn organization(&self, name: &str) -> Result<OrganizationSummary, ApiError> {
        let response = self.client.get(&github::org_repos_path(name)).await?;
        validate_response(&response, name, self.site())?;

        let body = response.text().await?;
        let summary = normalize::github::normalize(&body)?;
        debug!("GitHub organization {} has {} repositories", name, summary.repo_count);
        Ok(summary)
    }
}

/// Bitbucket workspaces via `GET /repositories/{workspace}`.
///
/// The client is expected to carry the bearer credential obtained at
/// startup; it is also used for the watcher/fork sub-resource lookups.
#[derive(Debug, Clone)]
pub struct BitbucketProvider {
    client: ProviderClient,
    policy: FanOutPolicy,
}

impl BitbucketProvider {
    /// Wraps an authenticated Bitbucket client.
    pub fn new(client: ProviderClient, policy: FanOutPolicy) -> Self {
        Self { client, policy }
    }
}

#[async_trait]
impl OrganizationProvider for BitbucketProvider {
    fn site(&self) -> &'static str {
        normalize::bitbucket::SITE
    }

    async fn organization(&self, name: &str) -> Result<OrganizationSummary, ApiError> {
        let response = self
            .client
            .get(&bitbucket::workspace_repos_path(name))
            .await?;
        validate_response(&response, name, self.site())?;

        let body = response.text().await?;
        let page = normalize::bitbucket::parse_listing(&body)?;
        let summary = normalize::bitbucket::normalize(&self.client, page, self.policy).await?;
        debug!("Bitbucket workspace {} has {} repositories", name, summary.repo_count);
        Ok(summary)
    }
}
