//
//  repo-aggregator
//  server/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Server
//!
//! Assembles the actix-web application: shared [`AppState`], route table
//! and the listener.
//!
//! ## Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/health` | [`handlers::health`] |
//! | GET | `/github/{organization}/` | [`handlers::github_organization`] |
//! | GET | `/bitbucket/{organization}/` | [`handlers::bitbucket_organization`] |
//! | GET | `/merged/` | [`handlers::merged`] |
//!
//! Every path is also served without its trailing slash (and `/health` with one).
//!
//! ## Startup
//!
//! [`build_state`] constructs the provider clients once. When Bitbucket
//! credentials are configured the token exchange happens here and a failure
//! aborts startup; without credentials Bitbucket routes answer 503.

pub mod error;
pub mod handlers;

#[cfg(test)]
mod handlers_http_tests;

use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::client::http_client;
use crate::api::{ApiError, ProviderClient};
use crate::auth::{client_credentials_token, AuthCredential};
use crate::config::Config;
use crate::provider::{BitbucketProvider, GitHubProvider, OrganizationProvider};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// GitHub organizations.
    pub github: Arc<dyn OrganizationProvider>,

    /// Bitbucket workspaces; `None` when no credentials are configured.
    pub bitbucket: Option<Arc<dyn OrganizationProvider>>,
}

impl AppState {
    /// Bitbucket provider, or [`ApiError::Unavailable`] when it is absent.
    pub fn bitbucket(&self) -> Result<&Arc<dyn OrganizationProvider>, ApiError> {
        self.bitbucket.as_ref().ok_or_else(|| {
            ApiError::Unavailable(
                "Bitbucket is not configured: set BITBUCKET_CLIENT_ID and BITBUCKET_CLIENT_SECRET"
                    .to_string(),
            )
        })
    }
}

/// Registers every route on `cfg`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/health", "/health/"]).route(web::get().to(handlers::health)))
        .service(
            web::resource(["/github/{organization}", "/github/{organization}/"])
                .route(web::get().to(handlers::github_organization)),
        )
        .service(
            web::resource(["/bitbucket/{organization}", "/bitbucket/{organization}/"])
                .route(web::get().to(handlers::bitbucket_organization)),
        )
        .service(
            web::resource(["/merged", "/merged/"]).route(web::get().to(handlers::merged)),
        );
}

/// Builds provider clients from `config`, exchanging Bitbucket credentials
/// for a bearer token when they are present.
///
/// # Errors
///
/// Fails when an HTTP client cannot be constructed or the token exchange is
/// rejected. The [`crate::auth::AuthError`] stays reachable through
/// `downcast_ref` on the returned error.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let http = http_client().context("Failed to build HTTP client")?;

    let github = GitHubProvider::new(ProviderClient::with_http(
        http.clone(),
        &config.github.api_url,
    ));

    let bitbucket: Option<Arc<dyn OrganizationProvider>> = match config.bitbucket.credentials() {
        Some((client_id, client_secret)) => {
            let token = client_credentials_token(
                &http,
                &config.bitbucket.token_url,
                client_id,
                client_secret,
            )
            .await
            .context("Failed to obtain Bitbucket access token")?;

            let credential = AuthCredential::from(token);
            match credential.expires_at() {
                Some(at) => info!("Bitbucket token valid until {}; it is not refreshed", at),
                None => info!("Bitbucket token has no reported expiry"),
            }

            let client = ProviderClient::with_http(http, &config.bitbucket.api_url)
                .with_auth(credential);
            Some(Arc::new(BitbucketProvider::new(
                client,
                config.bitbucket.fan_out_policy(),
            )))
        }
        None => {
            warn!("Bitbucket credentials not configured. Bitbucket routes will be unavailable.");
            None
        }
    };

    Ok(AppState {
        github: Arc::new(github),
        bitbucket,
    })
}

/// Serves `state` on the configured address until shutdown.
pub async fn run(config: &Config, state: AppState) -> std::io::Result<()> {
    let address = config.bind_address();
    let state = web::Data::new(state);

    info!("Starting repo-aggregator on {}", address);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(&address)?
    .run()
    .await
}
