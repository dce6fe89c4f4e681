//
//  repo-aggregator
//  auth/oauth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 2.0 Client-Credentials Exchange
//!
//! Bitbucket Cloud issues app-level access tokens through the OAuth 2.0
//! client-credentials grant:
//!
//! ```text
//! POST https://bitbucket.org/site/oauth2/access_token
//! Authorization: Basic base64(client_id:client_secret)
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=client_credentials
//! ```
//!
//! A successful response carries `access_token`, `token_type`, `expires_in`
//! and a space-separated `scopes` string.
//!
//! ## Security Considerations
//!
//! - Store the client secret in the environment; never commit it
//! - Token exchange errors include the response body, never the secret

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Bitbucket Cloud OAuth token endpoint.
pub const TOKEN_URL: &str = "https://bitbucket.org/site/oauth2/access_token";

/// Errors raised while obtaining a bearer token.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token endpoint could not be reached.
    #[error("Failed to reach token endpoint: {0}")]
    Network(#[from] reqwest::Error),

    /// The token endpoint answered with a non-success status.
    #[error("Cannot get a Bearer token (HTTP {status}): {body}")]
    TokenExchange {
        /// Status returned by the token endpoint.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The token endpoint returned a body without the expected fields.
    #[error("Failed to parse token response: {0}")]
    InvalidResponse(String),
}

/// Represents the response from Bitbucket's OAuth token endpoint.
///
/// # Notes
///
/// - Client-credentials tokens carry no refresh token.
/// - `expires_in` is typically 7200 seconds (2 hours) for Bitbucket.
#[derive(Debug, Clone)]
pub struct OAuthTokenResponse {
    /// The OAuth 2.0 access token for authenticating API requests.
    pub access_token: String,

    /// The type of token issued, typically "bearer".
    pub token_type: String,

    /// The lifetime of the access token in seconds.
    pub expires_in: Option<u64>,

    /// The list of scopes granted to the consumer.
    pub scopes: Vec<String>,
}

/// Internal struct for deserializing token responses from Bitbucket.
#[derive(Deserialize)]
struct TokenResponseRaw {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    expires_in: Option<u64>,
    scopes: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl From<TokenResponseRaw> for OAuthTokenResponse {
    fn from(raw: TokenResponseRaw) -> Self {
        let scopes = raw
            .scopes
            .map(|s| s.split_whitespace().map(String::from).collect())
            .unwrap_or_default();

        Self {
            access_token: raw.access_token,
            token_type: raw.token_type,
            expires_in: raw.expires_in,
            scopes,
        }
    }
}

/// Exchanges client credentials for an access token.
///
/// # Parameters
///
/// - `http`: Client used for the exchange.
/// - `token_url`: Token endpoint, normally [`TOKEN_URL`].
/// - `client_id` / `client_secret`: The OAuth consumer key and secret.
///
/// # Errors
///
/// Returns [`AuthError::TokenExchange`] for any non-success status. Callers
/// at startup treat every error from this function as fatal.
pub async fn client_credentials_token(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<OAuthTokenResponse, AuthError> {
    debug!("Requesting client-credentials token from {}", token_url);

    let response = http
        .post(token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenExchange { status, body });
    }

    let body = response.text().await?;
    let raw: TokenResponseRaw =
        serde_json::from_str(&body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
    let token = OAuthTokenResponse::from(raw);

    info!(
        "Obtained Bitbucket {} token (expires in {}s)",
        token.token_type,
        token
            .expires_in
            .map(|s| s.to_string())
            .unwrap_or_else(|| "?".to_string())
    );

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_exchange_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/site/oauth2/access_token")
            // base64("id:secret")
            .match_header("authorization", "Basic aWQ6c2VjcmV0")
            .match_body(Matcher::UrlEncoded(
                "grant_type".into(),
                "client_credentials".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token":"tok","token_type":"bearer","expires_in":7200,"scopes":"repository account"}"#,
            )
            .create_async()
            .await;

        let url = format!("{}/site/oauth2/access_token", server.url());
        let token = client_credentials_token(&Client::new(), &url, "id", "secret")
            .await
            .unwrap();

        assert_eq!(token.access_token, "tok");
        assert_eq!(token.expires_in, Some(7200));
        assert_eq!(token.scopes, vec!["repository", "account"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_exchange_failure_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(401)
            .with_body(r#"{"error":"invalid_client"}"#)
            .create_async()
            .await;

        let url = format!("{}/token", server.url());
        let err = client_credentials_token(&Client::new(), &url, "id", "wrong")
            .await
            .unwrap_err();

        match err {
            AuthError::TokenExchange { status, body } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert!(body.contains("invalid_client"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_exchange_rejects_body_without_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_body(r#"{"token_type":"bearer"}"#)
            .create_async()
            .await;

        let url = format!("{}/token", server.url());
        let err = client_credentials_token(&Client::new(), &url, "id", "secret")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidResponse(_)));
    }
}
