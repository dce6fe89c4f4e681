//
//  repo-aggregator
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Bitbucket requests are authenticated with an OAuth 2.0 bearer token
//! obtained through the client-credentials grant. GitHub requests are sent
//! unauthenticated.
//!
//! ## Lifecycle
//!
//! 1. At startup the configured client id and secret are exchanged for a
//!    token ([`client_credentials_token`]).
//! 2. The token is wrapped in an [`AuthCredential`] and attached to the
//!    Bitbucket [`ProviderClient`](crate::api::ProviderClient).
//! 3. The credential is reused for every Bitbucket call until the process
//!    exits. It is never refreshed; once expired, Bitbucket rejects calls
//!    and those rejections surface like any other provider status.
//!
//! ## Example
//!
//! ```rust,no_run
//! use repo_aggregator::auth::{client_credentials_token, AuthCredential, TOKEN_URL};
//!
//! async fn authenticate() -> Result<AuthCredential, repo_aggregator::auth::AuthError> {
//!     let http = reqwest::Client::new();
//!     let token = client_credentials_token(&http, TOKEN_URL, "id", "secret").await?;
//!     Ok(AuthCredential::from(token))
//! }
//! ```

mod oauth;

pub use oauth::*;

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::RequestBuilder;

/// A bearer credential attached to outbound provider requests.
///
/// The token value is never printed; `Debug` output redacts it.
#[derive(Clone)]
pub struct AuthCredential {
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl AuthCredential {
    /// Creates a non-expiring bearer credential from a raw token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
            expires_at: None,
        }
    }

    /// Creates a bearer credential that expires at `expires_at`.
    pub fn with_expiry(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Adds the `Authorization: Bearer <token>` header to `request`.
    ///
    /// Expiry is not checked here; see [`is_expired`](Self::is_expired).
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.access_token)
    }

    /// Returns the expiry instant, if the token endpoint reported one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Checks if the credential has expired.
    ///
    /// Credentials without an expiry never expire from this side; server
    /// side revocation is not detected.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => exp < Utc::now(),
            None => false,
        }
    }
}

impl From<OAuthTokenResponse> for AuthCredential {
    fn from(token: OAuthTokenResponse) -> Self {
        // Lifetimes too large to represent are treated as non-expiring.
        let expires_at = token
            .expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

        Self {
            access_token: token.access_token,
            expires_at,
        }
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredential")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
