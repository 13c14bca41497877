//! Catalog Search Gateway Library
//!
//! Sits between a client application and a full-text/aggregation index of
//! catalog items. The library holds everything the binary (`main.rs`) wires
//! together, plus the client-side request coordinator.
//!
//! ## Architecture Modules
//! - **`query`**: Pure query builder (relevance search, bool-prefix suggest, aggregations).
//! - **`results`**: Pure result assembler (hits with highlight fallback, facets, suggestions).
//! - **`gateway`**: The `IndexGateway` trait, the Elasticsearch adapter and the typed
//!   engine wire schemas.
//! - **`engine`**: An in-memory engine honouring the same query contract.
//! - **`search`**: The build -> execute -> assemble service and the public search endpoints.
//! - **`catalog`**: The item model and the administrative endpoints.
//! - **`coordinator`**: Client-side debounce, supersession and single-flight policy.

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod query;
pub mod results;
pub mod search;

use axum::routing::{get, post};
use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use catalog::handlers::{handle_create_index, handle_ingest, handle_seed};
use search::handlers::{handle_search, handle_suggest};
use search::service::SearchService;
use search::types::*;

/// Builds the HTTP router over `service`. CORS is fully open.
pub fn router(service: Arc<SearchService>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, get(handle_search))
        .route(ENDPOINT_SUGGEST, get(handle_suggest))
        .route(ENDPOINT_CREATE_INDEX, post(handle_create_index))
        .route(ENDPOINT_SEED, post(handle_seed))
        .route(ENDPOINT_INGEST, post(handle_ingest))
        .layer(Extension(service))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
