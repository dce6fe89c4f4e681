//
//  repo-aggregator
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for GitHub and Bitbucket
//!
//! This module provides the error type shared by every request path, the
//! response validator that gates provider bodies, and small payload types
//! used by both providers.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all request-path failures
//! - [`validate_response`] - Status gate run before any body is parsed
//! - [`Link`] - HATEOAS-style link representation
//! - Pagination envelope (re-exported from [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use repo_aggregator::api::common::{validate_response, ApiError};
//!
//! let response = reqwest::Response::from(http::Response::builder().status(404).body("").unwrap());
//! match validate_response(&response, "octo", "Github") {
//!     Err(ApiError::NotFound { organization, .. }) => assert_eq!(organization, "octo"),
//!     _ => unreachable!(),
//! }
//! ```

use hyper::ext::ReasonPhrase;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Unified error type for every failure on the request path.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `NotFound` | Provider reported the organization missing | 404 |
/// | `Upstream` | Provider returned any other non-200 | provider's status |
/// | `BadRequest` | Inbound request parameters were invalid | 400 |
/// | `MalformedPayload` | Provider body did not match the expected shape | 502 |
/// | `Network` | Provider could not be reached | 502 |
/// | `FanOut` | Bitbucket sub-resource batch failed after its retry | 500 |
/// | `Unavailable` | Provider is not configured | 503 |
///
/// The HTTP mapping itself lives in [`crate::server`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// The organization does not exist on the provider.
    #[error("The organization {organization} does not exist on {site}")]
    NotFound {
        /// Organization name as requested.
        organization: String,
        /// Provider display name (`Github` or `Bitbucket`).
        site: String,
    },

    /// The provider answered with a non-200, non-404 status.
    ///
    /// The status and reason are passed through verbatim.
    #[error("{reason}")]
    Upstream {
        /// Status code reported by the provider.
        status: u16,
        /// Reason phrase for that status.
        reason: String,
    },

    /// The inbound request was missing or had invalid parameters.
    #[error("{0}")]
    BadRequest(String),

    /// The provider body could not be parsed into the expected record shape.
    #[error("Malformed {site} payload: {detail}")]
    MalformedPayload {
        /// Provider display name.
        site: String,
        /// Parser error detail.
        detail: String,
    },

    /// A transport-level failure while talking to a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The concurrent Bitbucket watcher/fork lookups failed twice.
    #[error("Failed to resolve Bitbucket repository details: {0}")]
    FanOut(String),

    /// The provider is not configured on this instance.
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    /// Builds an [`ApiError::Upstream`] carrying the provider's status and
    /// reason phrase.
    pub fn upstream(response: &Response) -> Self {
        Self::Upstream {
            status: response.status().as_u16(),
            reason: reason_phrase(response),
        }
    }

    /// Builds a [`ApiError::MalformedPayload`] from a serde error.
    pub fn malformed(site: &str, err: &serde_json::Error) -> Self {
        Self::MalformedPayload {
            site: site.to_string(),
            detail: err.to_string(),
        }
    }
}

/// Validates a provider response status before its body is trusted.
///
/// - `200` passes.
/// - `404` becomes [`ApiError::NotFound`] naming `org_name` and `site`.
/// - Anything else becomes [`ApiError::Upstream`] carrying the provider's
///   status code and reason phrase unchanged.
///
/// # Example
///
/// ```rust
/// use repo_aggregator::api::common::validate_response;
///
/// let ok = reqwest::Response::from(http::Response::builder().status(200).body("").unwrap());
/// assert!(validate_response(&ok, "octo", "Github").is_ok());
///
/// let forbidden = reqwest::Response::from(http::Response::builder().status(403).body("").unwrap());
/// let err = validate_response(&forbidden, "octo", "Github").unwrap_err();
/// assert_eq!(err.to_string(), "Forbidden");
/// ```
pub fn validate_response(response: &Response, org_name: &str, site: &str) -> Result<(), ApiError> {
    match response.status() {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound {
            organization: org_name.to_string(),
            site: site.to_string(),
        }),
        _ => Err(ApiError::upstream(response)),
    }
}

/// Returns the reason phrase the provider sent on its status line.
///
/// hyper only records the phrase when it differs from the canonical one,
/// so the canonical phrase is used otherwise.
pub fn reason_phrase(response: &Response) -> String {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
        .map(str::to_string)
        .unwrap_or_else(|| {
            response
                .status()
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string()
        })
}

/// HATEOAS-style link for API resource navigation.
///
/// Bitbucket exposes watcher and fork counts only as linked sub-resources,
/// so these links are followed during normalization.
///
/// # Example
///
/// ```rust
/// use repo_aggregator::api::common::Link;
///
/// let link: Link = serde_json::from_str(
///     r#"{"href": "https://api.bitbucket.org/2.0/repositories/acme/api/watchers"}"#,
/// ).unwrap();
/// assert!(link.href.ends_with("/watchers"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// The URL of the linked resource.
    pub href: String,
}
