//! Search API Types
//!
//! Endpoint paths and request parameters of the public HTTP surface. Response
//! bodies are the assembler's types (`results::types`) and `error::ErrorBody`.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Ranked full-text search with facets.
pub const ENDPOINT_SEARCH: &str = "/search";
/// Autocomplete suggestions.
pub const ENDPOINT_SUGGEST: &str = "/suggest";
/// Administrative: create the catalog index.
pub const ENDPOINT_CREATE_INDEX: &str = "/create-index";
/// Administrative: bulk-load synthetic items.
pub const ENDPOINT_SEED: &str = "/seed";
/// Administrative: index a single item.
pub const ENDPOINT_INGEST: &str = "/ingest";

/// Query string of `GET /search` and `GET /suggest`.
///
/// `query` is optional at the extractor level so a missing parameter is
/// reported through the gateway's own validation error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct QueryParams {
    pub query: Option<String>,
}

impl QueryParams {
    pub fn require_query(self) -> Result<String, String> {
        self.query
            .ok_or_else(|| "missing required query parameter `query`".to_string())
    }
}
