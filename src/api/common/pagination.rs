//
//  repo-aggregator
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination envelope for Bitbucket API responses.
//!
//! Bitbucket Cloud wraps every collection in a page object whose `values`
//! field holds the items. Only the first page is ever consumed here; the
//! `next` link is inspected for logging and never followed. Other envelope
//! fields (`page`, `pagelen`, `size`) are ignored.
//!
//! # Example
//!
//! ```rust
//! use repo_aggregator::api::common::PaginatedResponse;
//!
//! let json = r#"{
//!     "values": [{"slug": "repo1"}],
//!     "page": 1,
//!     "pagelen": 10,
//!     "size": 25,
//!     "next": "https://api.bitbucket.org/2.0/repositories/acme?page=2"
//! }"#;
//!
//! let page: PaginatedResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
//! assert_eq!(page.values.len(), 1);
//! assert!(page.has_next());
//! ```

use serde::{Deserialize, Serialize};

/// A single page of results from the Bitbucket Cloud API.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Items in the current page |
/// | `next` | `Option<String>` | URL of the next page |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page. Always present, possibly empty.
    pub values: Vec<T>,

    /// URL to fetch the next page of results.
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Returns `true` when the provider reports more pages than the one held.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
