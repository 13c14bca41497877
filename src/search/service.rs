//! Search Service
//!
//! The server-side pipeline: build a query, execute it through the injected
//! [`IndexGateway`], assemble the raw response.

use crate::error::EngineError;
use crate::gateway::protocol::RawEngineResponse;
use crate::gateway::{EngineQuery, IndexGateway};
use crate::query::builder::{build_relevance_query_with, build_suggest_query};
use crate::query::types::DEFAULT_CATEGORY_BUCKETS;
use crate::results::assembler::{assemble_search_result, assemble_suggestions};
use crate::results::types::{SearchResult, SuggestionList};

use std::sync::Arc;

pub struct SearchService {
    gateway: Arc<dyn IndexGateway>,
    category_buckets: usize,
}

impl SearchService {
    pub fn new(gateway: Arc<dyn IndexGateway>) -> Self {
        Self::with_category_buckets(gateway, DEFAULT_CATEGORY_BUCKETS)
    }

    pub fn with_category_buckets(gateway: Arc<dyn IndexGateway>, category_buckets: usize) -> Self {
        Self {
            gateway,
            category_buckets,
        }
    }

    /// The engine handle, for the administrative endpoints.
    pub fn gateway(&self) -> &Arc<dyn IndexGateway> {
        &self.gateway
    }

    /// Runs a relevance search with facets for `text` (empty text included).
    pub async fn search(&self, text: &str) -> Result<SearchResult, EngineError> {
        let query = build_relevance_query_with(text, self.category_buckets);

        match self.gateway.execute(&EngineQuery::Relevance(query)).await? {
            RawEngineResponse::Search(raw) => {
                let result = assemble_search_result(raw);
                tracing::debug!(
                    "Search {:?}: {} hits of {}, {} categories",
                    text,
                    result.hits.len(),
                    result.total,
                    result.aggregations.categories.len()
                );
                Ok(result)
            }
            RawEngineResponse::Suggest(_) => Err(unexpected_shape("search")),
        }
    }

    /// Looks up name suggestions for `prefix`.
    ///
    /// An empty prefix returns an empty list without contacting the engine.
    pub async fn suggest(&self, prefix: &str) -> Result<SuggestionList, EngineError> {
        let Some(query) = build_suggest_query(prefix) else {
            return Ok(Vec::new());
        };
        let limit = query.limit;

        match self.gateway.execute(&EngineQuery::Suggest(query)).await? {
            RawEngineResponse::Suggest(raw) => Ok(assemble_suggestions(raw, limit)),
            RawEngineResponse::Search(_) => Err(unexpected_shape("suggest")),
        }
    }
}

fn unexpected_shape(expected: &str) -> EngineError {
    EngineError::Server {
        status: 0,
        debug: format!("gateway returned a response of the wrong shape for a {} query", expected),
    }
}
