//! Elasticsearch Gateway
//!
//! Renders built queries into the Elasticsearch query DSL, sends them over a
//! shared `reqwest::Client` and decodes the replies into the typed schemas of
//! [`super::protocol`].

use super::protocol::*;
use super::{EngineQuery, IndexGateway};
use crate::catalog::types::Item;
use crate::error::EngineError;
use crate::query::types::{RelevanceQuery, SuggestQuery};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

pub struct ElasticGateway {
    http_client: reqwest::Client,
    base_url: String,
    index: String,
    timeout: Option<Duration>,
}

impl ElasticGateway {
    pub fn new(http_client: reqwest::Client, base_url: &str, index: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            index: index.to_string(),
            timeout: None,
        }
    }

    /// Applies a per-request timeout on top of the client's defaults.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn index_url(&self, endpoint: &str) -> String {
        format!("{}/{}{}", self.base_url, self.index, endpoint)
    }

    /// DSL body of a relevance search.
    pub fn relevance_body(query: &RelevanceQuery) -> Value {
        let highlight_fields: serde_json::Map<String, Value> = query
            .highlight_fields
            .iter()
            .map(|field| (field.clone(), json!({})))
            .collect();

        json!({
            "track_total_hits": true,
            "query": {
                "multi_match": {
                    "query": query.text,
                    "fields": query.fields,
                    "fuzziness": query.fuzziness.as_str(),
                    // An empty text matches every item
                    "zero_terms_query": "all"
                }
            },
            "highlight": {
                "pre_tags": [HIGHLIGHT_PRE_TAG],
                "post_tags": [HIGHLIGHT_POST_TAG],
                "fields": highlight_fields
            },
            "aggs": {
                AGG_CATEGORIES: {
                    "terms": {
                        "field": query.aggregations.category_facet.field,
                        "size": query.aggregations.category_facet.requested_bucket_count
                    }
                },
                AGG_PRICE_STATS: {
                    "stats": { "field": query.aggregations.price_stats.field }
                }
            }
        })
    }

    /// DSL body of a suggestion lookup.
    pub fn suggest_body(query: &SuggestQuery) -> Value {
        json!({
            "size": query.limit,
            "_source": [query.field],
            "query": {
                "match_bool_prefix": {
                    query.field.as_str(): {
                        "query": query.prefix,
                        "operator": "and"
                    }
                }
            }
        })
    }

    /// Explicit mapping used by [`IndexGateway::create_index`].
    pub fn index_mapping() -> Value {
        json!({
            "mappings": {
                "properties": {
                    "id": { "type": "keyword" },
                    "name": { "type": "text" },
                    "description": { "type": "text" },
                    "category": { "type": "keyword" },
                    "price": { "type": "double" }
                }
            }
        })
    }

    /// Sends a request and returns the raw body of a successful response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, Vec<u8>), EngineError> {
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = debug_information(status.as_u16(), &body);
            tracing::debug!("Engine answered {}: {}", status, detail);
            return Err(EngineError::from_status(status.as_u16(), detail));
        }

        Ok((status.as_u16(), body.to_vec()))
    }

    async fn post_search<T: DeserializeOwned>(&self, body: &Value) -> Result<T, EngineError> {
        let (status, bytes) = self
            .send(self.http_client.post(self.index_url(ENDPOINT_SEARCH)).json(body))
            .await?;
        decode(status, &bytes)
    }
}

#[async_trait]
impl IndexGateway for ElasticGateway {
    async fn execute(&self, query: &EngineQuery) -> Result<RawEngineResponse, EngineError> {
        match query {
            EngineQuery::Relevance(q) => {
                tracing::debug!("Relevance search for {:?}", q.text);
                let raw: RawSearchResponse = self.post_search(&Self::relevance_body(q)).await?;
                Ok(RawEngineResponse::Search(raw))
            }
            EngineQuery::Suggest(q) => {
                tracing::debug!("Suggest lookup for {:?}", q.prefix);
                let raw: RawSuggestResponse = self.post_search(&Self::suggest_body(q)).await?;
                Ok(RawEngineResponse::Suggest(raw))
            }
        }
    }

    async fn create_index(&self) -> Result<(), EngineError> {
        let url = format!("{}/{}", self.base_url, self.index);
        self.send(self.http_client.put(url).json(&Self::index_mapping()))
            .await?;
        tracing::info!("Created index {}", self.index);
        Ok(())
    }

    async fn index_item(&self, item: &Item) -> Result<(), EngineError> {
        let url = format!(
            "{}/{}?refresh=wait_for",
            self.index_url(ENDPOINT_DOC),
            urlencoding::encode(&item.id)
        );
        self.send(self.http_client.put(url).json(item)).await?;
        tracing::debug!("Indexed item {}", item.id);
        Ok(())
    }

    async fn bulk_index(&self, items: &[Item]) -> Result<usize, EngineError> {
        if items.is_empty() {
            return Ok(0);
        }

        let payload = bulk_payload(items)
            .map_err(|e| EngineError::Validation { status: 0, debug: e.to_string() })?;

        let request = self
            .http_client
            .post(format!("{}?refresh=true", self.index_url(ENDPOINT_BULK)))
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(payload);
        let (status, bytes) = self.send(request).await?;
        let response: RawBulkResponse = decode(status, &bytes)?;

        let failed: Vec<&RawBulkItem> = response
            .items
            .iter()
            .flat_map(|entry| entry.values())
            .filter(|item| item.error.is_some())
            .collect();

        if response.errors || !failed.is_empty() {
            let first = failed
                .first()
                .and_then(|item| item.error.as_ref())
                .map(|e| e.to_string())
                .unwrap_or_default();
            return Err(EngineError::Validation {
                status,
                debug: format!("{} of {} items rejected: {}", failed.len(), items.len(), first),
            });
        }

        Ok(items.len())
    }
}

#[derive(Debug, Deserialize)]
struct RawBulkResponse {
    #[serde(default)]
    errors: bool,
    #[serde(default)]
    items: Vec<HashMap<String, RawBulkItem>>,
}

#[derive(Debug, Deserialize)]
struct RawBulkItem {
    #[serde(default)]
    error: Option<Value>,
}

/// Newline-delimited action/document pairs for `_bulk`.
fn bulk_payload(items: &[Item]) -> serde_json::Result<String> {
    let mut payload = String::new();
    for item in items {
        payload.push_str(&serde_json::to_string(&json!({ "index": { "_id": item.id } }))?);
        payload.push('\n');
        payload.push_str(&serde_json::to_string(item)?);
        payload.push('\n');
    }
    Ok(payload)
}

fn decode<T: DeserializeOwned>(status: u16, bytes: &[u8]) -> Result<T, EngineError> {
    serde_json::from_slice(bytes).map_err(|e| EngineError::Server {
        status,
        debug: format!("malformed engine response: {}", e),
    })
}

/// Extracts a readable diagnostic from an engine error body.
fn debug_information(status: u16, body: &[u8]) -> String {
    match serde_json::from_slice::<RawErrorBody>(body) {
        Ok(RawErrorBody {
            error: Some(error), ..
        }) => {
            let reason = error
                .get("root_cause")
                .and_then(|causes| causes.get(0))
                .and_then(|cause| cause.get("reason"))
                .or_else(|| error.get("reason"))
                .and_then(Value::as_str);
            match reason {
                Some(reason) => format!("status {}: {} ({})", status, reason, error),
                None => format!("status {}: {}", status, error),
            }
        }
        _ => format!("status {}: {}", status, String::from_utf8_lossy(body)),
    }
}
