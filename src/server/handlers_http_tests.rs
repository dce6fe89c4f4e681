//
//  repo-aggregator
//  server/handlers_http_tests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! HTTP Integration Tests for Request Handlers
//!
//! These tests drive the full route table through `actix_web::test` with
//! in-memory providers, so no outbound HTTP happens.

#[cfg(test)]
mod http_integration_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use actix_web::{test, web, App};
    use async_trait::async_trait;
    use serde_json::Value;

    use crate::api::ApiError;
    use crate::normalize::{OrganizationSummary, RepositoryRecord};
    use crate::provider::OrganizationProvider;
    use crate::server::handlers::MERGED_USAGE;
    use crate::server::{configure_routes, AppState};

    /// Serves canned repositories for one known organization.
    struct FakeProvider {
        site: &'static str,
        known: &'static str,
        repos: Vec<RepositoryRecord>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(site: &'static str, known: &'static str, repos: Vec<RepositoryRecord>) -> Arc<Self> {
            Arc::new(Self {
                site,
                known,
                repos,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OrganizationProvider for FakeProvider {
        fn site(&self) -> &'static str {
            self.site
        }

        async fn organization(&self, name: &str) -> Result<OrganizationSummary, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if name == self.known {
                Ok(OrganizationSummary::from_repos(self.repos.clone()))
            } else {
                Err(ApiError::NotFound {
                    organization: name.to_string(),
                    site: self.site.to_string(),
                })
            }
        }
    }

    /// Always fails the way an exhausted Bitbucket fan-out does.
    struct FailingProvider;

    #[async_trait]
    impl OrganizationProvider for FailingProvider {
        fn site(&self) -> &'static str {
            "Bitbucket"
        }

        async fn organization(&self, _name: &str) -> Result<OrganizationSummary, ApiError> {
            Err(ApiError::FanOut("watchers lookup failed".to_string()))
        }
    }

    fn record(name: &str, language: Option<&str>, watchers: u64, forks: u64) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            language: language.map(String::from),
            topic: Some(format!("{name} topic")),
            watchers,
            forks,
        }
    }

    fn github() -> Arc<FakeProvider> {
        FakeProvider::new(
            "Github",
            "acme",
            vec![
                record("api", Some("Go"), 5, 1),
                record("docs", None, 1, 0),
                record("web", Some("Python"), 2, 2),
            ],
        )
    }

    fn bitbucket(known: &'static str) -> Arc<FakeProvider> {
        FakeProvider::new(
            "Bitbucket",
            known,
            vec![record("infra", Some("python"), 3, 4), record("cli", Some("Go"), 0, 1)],
        )
    }

    fn state(
        github: Arc<dyn OrganizationProvider>,
        bitbucket: Option<Arc<dyn OrganizationProvider>>,
    ) -> web::Data<AppState> {
        web::Data::new(AppState { github, bitbucket })
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state).configure(configure_routes)).await
        };
    }

    #[actix_web::test]
    async fn test_health_ignores_providers() {
        let app = app!(state(Arc::new(FailingProvider), None));

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "response": "All Good!" }));
    }

    #[actix_web::test]
    async fn test_github_summary_with_and_without_trailing_slash() {
        let app = app!(state(github(), None));

        for uri in ["/github/acme/", "/github/acme"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200, "{uri}");

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["repo_count"], 3);
            assert_eq!(body["watcher_count"], 8);
            assert_eq!(body["fork_count"], 3);
            assert_eq!(body["languages"], serde_json::json!(["Go", "Python"]));
            assert_eq!(body["repos"][1]["language"], Value::Null);
        }
    }

    #[actix_web::test]
    async fn test_unknown_organization_is_404_with_message() {
        let app = app!(state(github(), Some(bitbucket("acme"))));

        let req = test::TestRequest::get().uri("/bitbucket/ghost/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["message"],
            "The organization ghost does not exist on Bitbucket"
        );
    }

    #[actix_web::test]
    async fn test_bitbucket_unconfigured_is_503() {
        let app = app!(state(github(), None));

        let req = test::TestRequest::get().uri("/bitbucket/acme/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);

        let req = test::TestRequest::get().uri("/merged/?org=acme").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("BITBUCKET_CLIENT_ID"));
    }

    #[actix_web::test]
    async fn test_merged_by_org() {
        let gh = github();
        let bb = bitbucket("acme");
        let app = app!(state(gh.clone(), Some(bb.clone())));

        let req = test::TestRequest::get().uri("/merged/?org=acme").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        let totals = &body["Merged Totals"];
        assert_eq!(totals["total_repos"], 5);
        assert_eq!(totals["total_watchers"], 11);
        assert_eq!(totals["total_forks"], 8);
        assert_eq!(
            totals["languages"],
            serde_json::json!(["Go", "Python", "python", "Go"])
        );
        assert_eq!(body["GitHub"]["repo_count"], 3);
        assert_eq!(body["Bitbucket"]["repo_count"], 2);
        assert_eq!(gh.calls(), 1);
        assert_eq!(bb.calls(), 1);
    }

    #[actix_web::test]
    async fn test_merged_by_split_names() {
        let app = app!(state(github(), Some(bitbucket("acme-team"))));

        let req = test::TestRequest::get()
            .uri("/merged?github=acme&bitbucket=acme-team")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["Merged Totals"]["total_repos"], 5);
    }

    #[actix_web::test]
    async fn test_merged_matches_single_provider_routes() {
        let app = app!(state(github(), Some(bitbucket("acme"))));

        let req = test::TestRequest::get().uri("/merged/?org=acme").to_request();
        let merged: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let req = test::TestRequest::get().uri("/github/acme/").to_request();
        let github: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let req = test::TestRequest::get().uri("/bitbucket/acme/").to_request();
        let bitbucket: Value = test::read_body_json(test::call_service(&app, req).await).await;

        assert_eq!(merged["GitHub"], github);
        assert_eq!(merged["Bitbucket"], bitbucket);
    }

    #[actix_web::test]
    async fn test_merged_missing_params_is_400_without_provider_calls() {
        let gh = github();
        let bb = bitbucket("acme");
        let app = app!(state(gh.clone(), Some(bb.clone())));

        for uri in ["/merged/", "/merged/?github=acme", "/merged/?org=&bitbucket=acme"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400, "{uri}");

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], MERGED_USAGE);
        }

        assert_eq!(gh.calls(), 0);
        assert_eq!(bb.calls(), 0);
    }

    #[actix_web::test]
    async fn test_merged_any_failure_aborts() {
        let app = app!(state(github(), Some(bitbucket("acme"))));

        let req = test::TestRequest::get()
            .uri("/merged/?github=ghost&bitbucket=acme")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "The organization ghost does not exist on Github");
    }

    #[actix_web::test]
    async fn test_fan_out_failure_is_500() {
        let app = app!(state(github(), Some(Arc::new(FailingProvider))));

        let req = test::TestRequest::get().uri("/bitbucket/acme/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let req = test::TestRequest::get().uri("/merged/?org=acme").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);
    }

    #[actix_web::test]
    async fn test_invalid_organization_name_is_400() {
        let gh = github();
        let bb = bitbucket("acme");
        let app = app!(state(gh.clone(), Some(bb.clone())));

        for uri in [
            "/github/ac%20me/",
            "/github/%2E%2E/",
            "/github/%2e/",
            "/github/ac%252Fme/",
            "/bitbucket/%2E%2E/",
            "/merged/?org=..",
            "/merged/?github=acme&bitbucket=.",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400, "{uri}");

            let body: Value = test::read_body_json(resp).await;
            assert!(
                body["message"]
                    .as_str()
                    .unwrap()
                    .starts_with("Invalid organization name"),
                "{uri}"
            );
        }

        assert_eq!(gh.calls(), 0);
        assert_eq!(bb.calls(), 0);
    }
}
