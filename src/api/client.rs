//
//  repo-aggregator
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for Provider APIs
//!
//! This module provides the HTTP client used identically for GitHub and
//! Bitbucket. A client is bound to a base URL and, optionally, to an
//! authentication credential that is attached to every request.
//!
//! ## Features
//!
//! - Leading-slash normalization of endpoint paths
//! - Authentication header injection
//! - Custom User-Agent header (required by GitHub)
//! - Raw responses returned for the caller to validate
//!
//! No retry and no explicit timeout are configured here; the reqwest
//! defaults apply.

use reqwest::{Client, Response};
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::auth::AuthCredential;

/// Public GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Public Bitbucket Cloud API v2.0 base URL.
pub const BITBUCKET_API_URL: &str = "https://api.bitbucket.org/2.0";

/// Builds the shared reqwest client with this crate's User-Agent.
pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
        .build()
}

/// A minimal GET client bound to a provider base URL.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use repo_aggregator::api::ProviderClient;
///
/// let github = ProviderClient::new("https://api.github.com")?;
/// # Ok::<(), reqwest::Error>(())
/// ```
///
/// # Authentication
///
/// ```rust,no_run
/// use repo_aggregator::api::ProviderClient;
/// use repo_aggregator::auth::AuthCredential;
///
/// let bitbucket = ProviderClient::new("https://api.bitbucket.org/2.0")?
///     .with_auth(AuthCredential::bearer("token"));
/// # Ok::<(), reqwest::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProviderClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL without a trailing slash
    base_url: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
}

impl ProviderClient {
    /// Creates an unauthenticated client for `base_url`.
    ///
    /// A trailing slash on `base_url` is removed so that endpoint paths can
    /// always start with one.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        Ok(Self::with_http(http_client()?, base_url))
    }

    /// Creates a client that reuses an existing reqwest [`Client`].
    pub fn with_http(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: None,
        }
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Builds the absolute URL for `endpoint`, adding a leading `/` if missing.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use repo_aggregator::api::ProviderClient;
    ///
    /// let client = ProviderClient::new("https://api.github.com/")?;
    /// assert_eq!(client.url_for("orgs/acme/repos"), "https://api.github.com/orgs/acme/repos");
    /// assert_eq!(client.url_for("/orgs/acme/repos"), "https://api.github.com/orgs/acme/repos");
    /// # Ok::<(), reqwest::Error>(())
    /// ```
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Issues a GET for `endpoint` relative to the base URL.
    ///
    /// The raw response is returned unvalidated; run it through
    /// [`validate_response`](crate::api::common::validate_response) before
    /// reading the body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the request could not be sent.
    pub async fn get(&self, endpoint: &str) -> Result<Response, ApiError> {
        let url = self.url_for(endpoint);
        self.get_url(&url).await
    }

    /// Issues a GET for an absolute URL, such as a linked sub-resource.
    ///
    /// The configured credential is attached just like for [`get`](Self::get).
    pub async fn get_url(&self, url: &str) -> Result<Response, ApiError> {
        let mut request = self.http.get(url);

        if let Some(auth) = &self.auth {
            if auth.is_expired() {
                warn!("Bearer token has expired; request to {} may be rejected", url);
            }
            request = auth.apply_to_request(request);
        }

        debug!("GET {}", url);
        let response = request.send().await?;
        debug!("GET {} -> {}", url, response.status());

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_normalizes_leading_slash() {
        let client = ProviderClient::new("https://api.github.com").unwrap();
        assert_eq!(
            client.url_for("orgs/acme/repos"),
            "https://api.github.com/orgs/acme/repos"
        );
        assert_eq!(
            client.url_for("/orgs/acme/repos"),
            "https://api.github.com/orgs/acme/repos"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ProviderClient::new("https://api.bitbucket.org/2.0/").unwrap();
        assert_eq!(
            client.url_for("/repositories/acme"),
            "https://api.bitbucket.org/2.0/repositories/acme"
        );
    }

    #[tokio::test]
    async fn test_get_attaches_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/acme")
            .match_header("authorization", "Bearer secret-token")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = ProviderClient::new(&server.url())
            .unwrap()
            .with_auth(AuthCredential::bearer("secret-token"));
        let response = client.get("repositories/acme").await.unwrap();

        assert_eq!(response.status(), 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_returns_non_success_unvalidated() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/orgs/ghost/repos")
            .with_status(404)
            .create_async()
            .await;

        let client = ProviderClient::new(&server.url()).unwrap();
        let response = client.get("/orgs/ghost/repos").await.unwrap();

        assert_eq!(response.status(), 404);
    }
}
