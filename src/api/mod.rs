//
//  repo-aggregator
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the outbound side of the service: one HTTP client
//! type shared by both providers plus the typed payloads each provider
//! returns.
//!
//! ## Supported Providers
//!
//! - **GitHub**: REST API at `api.github.com`, unauthenticated
//! - **Bitbucket Cloud**: API v2.0 at `api.bitbucket.org`, OAuth 2.0 bearer
//!
//! ## Architecture
//!
//! - [`client`]: [`ProviderClient`], a GET wrapper bound to a base URL
//! - [`common`]: [`ApiError`], the response validator and shared types
//! - [`github`]: GitHub repository payloads
//! - [`bitbucket`]: Bitbucket repository payloads and linked collections
//!
//! ## Error Handling
//!
//! Every provider response passes through
//! [`validate_response`](common::validate_response) before its body is
//! parsed. Parsing then goes into typed records; a shape mismatch becomes
//! [`ApiError::MalformedPayload`] rather than a panic.

/// Core HTTP client wrapper for provider APIs.
pub mod client;

/// Common types shared between providers.
///
/// Includes:
/// - [`ApiError`]: Standardized error type
/// - [`common::validate_response`]: Status gate for provider responses
/// - [`common::PaginatedResponse`]: Bitbucket page envelope
/// - [`common::Link`]: HATEOAS link type
pub mod common;

/// GitHub REST API payloads.
pub mod github;

/// Bitbucket Cloud API v2.0 payloads.
pub mod bitbucket;

pub use client::ProviderClient;
pub use common::ApiError;
