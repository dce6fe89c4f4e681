//
//  repo-aggregator
//  server/handlers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request handlers
//!
//! Each handler resolves its organization name(s), calls the provider(s)
//! from [`AppState`] and returns the summary as JSON. Errors are returned as
//! [`ApiError`] and rendered by its `ResponseError` impl.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::api::ApiError;
use crate::normalize::MergedReport;

use super::AppState;

/// Message returned when `/merged/` is called without usable parameters.
pub const MERGED_USAGE: &str =
    "Either an ?org= parameter is required, or ?bitbucket=x&github=y query parameters are required";

/// Query parameters accepted by `/merged/`.
#[derive(Debug, Default, Deserialize)]
pub struct MergedQuery {
    /// Organization name used on both providers.
    pub org: Option<String>,

    /// GitHub organization name.
    pub github: Option<String>,

    /// Bitbucket workspace name.
    pub bitbucket: Option<String>,
}

impl MergedQuery {
    /// Returns `(github, bitbucket)` names. `org` wins when present; empty
    /// values count as absent.
    pub fn targets(&self) -> Option<(&str, &str)> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        match present(&self.org) {
            Some(org) => Some((org, org)),
            None => Some((present(&self.github)?, present(&self.bitbucket)?)),
        }
    }
}

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "response": "All Good!" }))
}

/// GET /github/{organization}/
pub async fn github_organization(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let organization = check_name(&path)?;
    let summary = state.github.organization(organization).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// GET /bitbucket/{organization}/
pub async fn bitbucket_organization(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let organization = check_name(&path)?;
    let summary = state.bitbucket()?.organization(organization).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// GET /merged/?org=X or /merged/?github=A&bitbucket=B
///
/// Both providers are queried concurrently; the first failure aborts the
/// response.
pub async fn merged(
    state: web::Data<AppState>,
    query: web::Query<MergedQuery>,
) -> Result<HttpResponse, ApiError> {
    let (github_name, bitbucket_name) = query
        .targets()
        .ok_or_else(|| ApiError::BadRequest(MERGED_USAGE.to_string()))?;
    let github_name = check_name(github_name)?;
    let bitbucket_name = check_name(bitbucket_name)?;
    let bitbucket = state.bitbucket()?;

    debug!("Merging GitHub {} with Bitbucket {}", github_name, bitbucket_name);
    let (github, bitbucket) = tokio::try_join!(
        state.github.organization(github_name),
        bitbucket.organization(bitbucket_name),
    )?;

    Ok(HttpResponse::Ok().json(MergedReport::new(github, bitbucket)))
}

/// Rejects names that would change the shape of the outbound URL.
///
/// Dot segments are resolved away by URL parsing (`/orgs/../repos` becomes
/// `/repos`), so `.` and `..` are refused along with separators and `%`.
fn check_name(name: &str) -> Result<&str, ApiError> {
    let invalid = matches!(name, "" | "." | "..")
        || name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace());
    if invalid {
        return Err(ApiError::BadRequest(format!(
            "Invalid organization name: {name:?}"
        )));
    }
    Ok(name)
}
