//
//  repo-aggregator
//  normalize/github.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! GitHub listing normalization.
//!
//! The GitHub listing is already a flat array with inline counts, so this is
//! a synchronous field mapping:
//!
//! | GitHub field | Record field |
//! |--------------|--------------|
//! | `name` | `name` |
//! | `language` | `language` |
//! | `description` | `topic` |
//! | `watchers_count` | `watchers` |
//! | `forks_count` | `forks` |

use crate::api::github::Repository;
use crate::api::ApiError;

use super::{OrganizationSummary, RepositoryRecord};

/// Provider display name used in error messages.
pub const SITE: &str = "Github";

impl From<Repository> for RepositoryRecord {
    fn from(repo: Repository) -> Self {
        Self {
            name: repo.name,
            language: repo.language,
            topic: repo.description,
            watchers: repo.watchers_count,
            forks: repo.forks_count,
        }
    }
}

/// Parses a validated `GET /orgs/{org}/repos` body into a summary.
///
/// # Errors
///
/// Returns [`ApiError::MalformedPayload`] if the body is not an array of
/// repositories with the required fields.
pub fn normalize(body: &str) -> Result<OrganizationSummary, ApiError> {
    let repos: Vec<Repository> =
        serde_json::from_str(body).map_err(|e| ApiError::malformed(SITE, &e))?;

    Ok(OrganizationSummary::from_repos(
        repos.into_iter().map(RepositoryRecord::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_repo_example() {
        let body = r#"[{"name":"a","watchers_count":5,"forks_count":1,"language":"Go","description":"x"}]"#;
        let summary = normalize(body).unwrap();

        assert_eq!(
            summary.repos,
            vec![RepositoryRecord {
                name: "a".to_string(),
                language: Some("Go".to_string()),
                topic: Some("x".to_string()),
                watchers: 5,
                forks: 1,
            }]
        );
        assert_eq!(summary.repo_count, 1);
        assert_eq!(summary.languages, vec!["Go"]);
        assert_eq!(summary.fork_count, 1);
        assert_eq!(summary.watcher_count, 5);
    }

    #[test]
    fn test_null_language_and_description() {
        let body = r#"[
            {"name":"a","watchers_count":1,"forks_count":0,"language":null,"description":null},
            {"name":"b","watchers_count":2,"forks_count":3,"language":"C","description":"lib"}
        ]"#;
        let summary = normalize(body).unwrap();

        assert_eq!(summary.languages, vec!["C"]);
        assert_eq!(summary.repos[0].topic, None);
        assert_eq!(summary.watcher_count, 3);
        assert_eq!(summary.fork_count, 3);
    }

    #[test]
    fn test_empty_listing() {
        let summary = normalize("[]").unwrap();
        assert_eq!(summary.repo_count, 0);
    }

    #[test]
    fn test_object_body_is_malformed() {
        let err = normalize(r#"{"message":"API rate limit exceeded"}"#).unwrap_err();
        match err {
            ApiError::MalformedPayload { site, .. } => assert_eq!(site, "Github"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_count_is_malformed() {
        let err = normalize(r#"[{"name":"a","forks_count":1}]"#).unwrap_err();
        assert!(matches!(err, ApiError::MalformedPayload { .. }));
    }
}
