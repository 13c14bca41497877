//! Search Endpoint Tests
//!
//! Drives `GET /search` and `GET /suggest` through the full router over the
//! in-memory engine.
//!
//! ## Test Scopes
//! - **Validation**: Missing parameters and empty prefixes.
//! - **Search**: Fuzzy matching, highlight fallback, match-all with facets.
//! - **Suggest**: Name suggestions and their limit.
//! - **Engine Failures**: Client-visible 400 with the engine's diagnostic.
//! - **HTTP Client**: The coordinator's HTTP backend against a served gateway.

#[cfg(test)]
mod tests {
    use crate::catalog::types::Item;
    use crate::coordinator::backend::{HttpSearchClient, SearchBackend};
    use crate::engine::index::MemoryEngine;
    use crate::error::{ClientError, EngineError, ErrorBody};
    use crate::gateway::protocol::RawEngineResponse;
    use crate::gateway::{EngineQuery, IndexGateway};
    use crate::results::types::{SearchResult, SuggestionList};
    use crate::router;
    use crate::search::service::SearchService;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde::de::DeserializeOwned;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn item(id: &str, name: &str, description: &str, category: &str, price: f64) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            price,
        }
    }

    fn catalog() -> Vec<Item> {
        vec![
            item("1", "Premium Widget 1", "A premium widget built to last.", "Tools", 19.99),
            item("2", "Compact Gadget 2", "A compact gadget.", "Electronics", 49.5),
            item("3", "Classic Lamp 3", "A classic lamp in a sleek matte finish.", "Home", 35.0),
            item("4", "Premium Kettle 4", "A premium kettle.", "Kitchen", 60.0),
            item("5", "Rugged Tent 5", "A rugged tent.", "Outdoors", 250.0),
            item("6", "Smart Lamp 6", "A smart lamp.", "Home", 42.0),
        ]
    }

    /// Counts engine calls before delegating to an in-memory engine.
    struct CountingGateway {
        inner: MemoryEngine,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IndexGateway for CountingGateway {
        async fn execute(&self, query: &EngineQuery) -> Result<RawEngineResponse, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.execute(query).await
        }

        async fn create_index(&self) -> Result<(), EngineError> {
            self.inner.create_index().await
        }

        async fn index_item(&self, item: &Item) -> Result<(), EngineError> {
            self.inner.index_item(item).await
        }

        async fn bulk_index(&self, items: &[Item]) -> Result<usize, EngineError> {
            self.inner.bulk_index(items).await
        }
    }

    /// Rejects every query the way an engine rejects a malformed one.
    struct RejectingGateway;

    #[async_trait]
    impl IndexGateway for RejectingGateway {
        async fn execute(&self, _query: &EngineQuery) -> Result<RawEngineResponse, EngineError> {
            Err(EngineError::Validation {
                status: 400,
                debug: "parsing_exception: unknown query [multi_match]".to_string(),
            })
        }

        async fn create_index(&self) -> Result<(), EngineError> {
            Ok(())
        }

        async fn index_item(&self, _item: &Item) -> Result<(), EngineError> {
            Ok(())
        }

        async fn bulk_index(&self, items: &[Item]) -> Result<usize, EngineError> {
            Ok(items.len())
        }
    }

    fn counting_app() -> (Router, Arc<CountingGateway>) {
        let gateway = Arc::new(CountingGateway {
            inner: MemoryEngine::with_items(catalog()),
            calls: AtomicUsize::new(0),
        });
        let app = router(Arc::new(SearchService::new(gateway.clone())));
        (app, gateway)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
        let (status, bytes) = get(app, uri).await;
        let body = serde_json::from_slice(&bytes).expect("JSON body");
        (status, body)
    }

    // ============================================================
    // VALIDATION
    // ============================================================

    #[tokio::test]
    async fn test_missing_query_is_rejected_before_engine() {
        let (app, gateway) = counting_app();

        let (status, body): (_, ErrorBody) = get_json(app, "/search").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.kind, "validation");
        assert!(body.error.contains("query"));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_suggest_query_is_rejected() {
        let (app, _) = counting_app();

        let (status, body): (_, ErrorBody) = get_json(app, "/suggest").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.kind, "validation");
    }

    #[tokio::test]
    async fn test_empty_suggest_prefix_skips_engine() {
        let (app, gateway) = counting_app();

        let (status, body): (_, SuggestionList) = get_json(app, "/suggest?query=").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    // ============================================================
    // SEARCH
    // ============================================================

    #[tokio::test]
    async fn test_misspelled_search_finds_and_highlights() {
        let (app, _) = counting_app();

        let (status, result): (_, SearchResult) = get_json(app, "/search?query=widgt").await;
        let hit = result
            .hits
            .iter()
            .find(|h| h.source.id == "1")
            .expect("one-edit misspelling matches");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(hit.display.name, "Premium <em>Widget</em> 1");
        assert_eq!(hit.fragments("name"), ["Premium <em>Widget</em> 1".to_string()]);
    }

    #[tokio::test]
    async fn test_two_edit_misspelling_of_short_term_finds_nothing() {
        let (app, _) = counting_app();

        // "wigt" is 4 chars: AUTO allows one edit, "widget" is two away
        let (status, result): (_, SearchResult) = get_json(app, "/search?query=wigt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(result.total, 0);
        assert!(result.hits.is_empty());
    }

    #[tokio::test]
    async fn test_unhighlighted_field_falls_back_to_raw_value() {
        let (app, _) = counting_app();

        let (_, result): (_, SearchResult) = get_json(app, "/search?query=tent").await;
        let hit = &result.hits[0];

        assert_eq!(hit.source.id, "5");
        assert_eq!(hit.display.name, "Rugged <em>Tent</em> 5");
        assert_eq!(hit.display.description, "A rugged <em>tent</em>.");

        let (app, _) = counting_app();
        let (_, result): (_, SearchResult) = get_json(app, "/search?query=matte").await;
        let hit = &result.hits[0];

        // "matte" only occurs in the description
        assert_eq!(hit.display.name, "Classic Lamp 3");
        assert!(hit.fragments("name").is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_returns_everything_with_facets() {
        let (app, _) = counting_app();

        let (status, result): (_, SearchResult) = get_json(app, "/search?query=").await;
        let facets = &result.aggregations;
        let bucket_total: u64 = facets.categories.iter().map(|b| b.doc_count).sum();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(result.total, 6);
        assert_eq!(facets.categories.len(), 5);
        assert_eq!(bucket_total, 6);
        assert_eq!(facets.categories[0].key, "Home");
        assert_eq!(facets.price_stats.count, 6);
        assert_eq!(facets.price_stats.min, 19.99);
        assert_eq!(facets.price_stats.max, 250.0);
        assert!(facets.price_stats.min <= facets.price_stats.avg);
        assert!(facets.price_stats.avg <= facets.price_stats.max);
    }

    #[tokio::test]
    async fn test_search_without_matches_has_zero_stats() {
        let (app, _) = counting_app();

        let (status, result): (_, SearchResult) = get_json(app, "/search?query=xylophone").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(result.total, 0);
        assert!(result.hits.is_empty());
        assert!(result.aggregations.categories.is_empty());
        assert_eq!(result.aggregations.price_stats.count, 0);
        assert_eq!(result.aggregations.price_stats.avg, 0.0);
    }

    #[tokio::test]
    async fn test_search_response_json_shape() {
        let (app, _) = counting_app();

        let (_, body): (_, serde_json::Value) = get_json(app, "/search?query=lamp").await;

        assert!(body["total"].is_u64());
        assert!(body["hits"][0]["source"]["price"].is_number());
        assert!(body["aggregations"]["categories"][0]["docCount"].is_u64());
        assert!(body["aggregations"]["priceStats"]["avg"].is_number());
    }

    // ============================================================
    // SUGGEST
    // ============================================================

    #[tokio::test]
    async fn test_suggest_returns_matching_names() {
        let (app, gateway) = counting_app();

        let (status, mut names): (_, SuggestionList) = get_json(app, "/suggest?query=prem").await;
        names.sort();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(names, vec!["Premium Kettle 4", "Premium Widget 1"]);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_suggest_is_limited_to_five() {
        let items: Vec<Item> = (1..=9)
            .map(|n| item(&n.to_string(), &format!("Deluxe Chair {}", n), "", "Home", 10.0))
            .collect();
        let app = router(Arc::new(SearchService::new(Arc::new(MemoryEngine::with_items(items)))));

        let (_, names): (_, SuggestionList) = get_json(app, "/suggest?query=deluxe%20ch").await;

        assert_eq!(names.len(), 5);
        assert!(names.iter().all(|n| n.starts_with("Deluxe Chair")));
    }

    // ============================================================
    // ENGINE FAILURES
    // ============================================================

    #[tokio::test]
    async fn test_engine_rejection_is_client_visible_400() {
        let app = router(Arc::new(SearchService::new(Arc::new(RejectingGateway))));

        let (status, body): (_, ErrorBody) = get_json(app, "/search?query=lamp").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.kind, "engine_validation");
        assert!(body.error.contains("parsing_exception"));
    }

    #[tokio::test]
    async fn test_missing_index_is_reported() {
        let app = router(Arc::new(SearchService::new(Arc::new(MemoryEngine::new()))));

        let (status, body): (_, ErrorBody) = get_json(app, "/suggest?query=lam").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("index_not_found_exception"));
    }

    // ============================================================
    // HTTP CLIENT
    // ============================================================

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("{}/", addr)
    }

    #[tokio::test]
    async fn test_http_client_round_trip() {
        let (app, _) = counting_app();
        let client = HttpSearchClient::new(reqwest::Client::new(), &serve(app).await);

        let suggestions = client.suggest("smart l").await.unwrap();
        let result = client.search("premium widget").await.unwrap();

        assert!(client.base_url().starts_with("http://127.0.0.1:"));
        assert_eq!(suggestions, vec!["Smart Lamp 6"]);
        assert_eq!(result.hits[0].source.id, "1");
    }

    #[tokio::test]
    async fn test_http_client_surfaces_rejection() {
        let app = router(Arc::new(SearchService::new(Arc::new(RejectingGateway))));
        let client = HttpSearchClient::new(reqwest::Client::new(), &serve(app).await);

        let err = client.search("lamp").await.unwrap_err();

        match &err {
            ClientError::Rejected { status, kind, message } => {
                assert_eq!(*status, 400);
                assert_eq!(kind, "engine_validation");
                assert!(message.contains("parsing_exception"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(!err.is_retryable());
    }
}
