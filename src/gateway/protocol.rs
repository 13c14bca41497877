//! Index Engine Wire Protocol
//!
//! Typed schemas for the engine's raw responses. Every engine response is
//! decoded into these structures at the gateway boundary, so nothing past the
//! gateway ever handles an untyped JSON map.
//!
//! Field names follow the engine's own JSON (`_source`, `doc_count`, ...).

use crate::catalog::types::Item;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- Engine endpoints (relative to `<base>/<index>`) ---

pub const ENDPOINT_SEARCH: &str = "/_search";
pub const ENDPOINT_DOC: &str = "/_doc";
pub const ENDPOINT_BULK: &str = "/_bulk";

/// Aggregation names used in every relevance query.
pub const AGG_CATEGORIES: &str = "categories";
pub const AGG_PRICE_STATS: &str = "price_stats";

/// Markup the engine wraps around matched terms (engine default).
pub const HIGHLIGHT_PRE_TAG: &str = "<em>";
pub const HIGHLIGHT_POST_TAG: &str = "</em>";

/// Raw response for either query shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEngineResponse {
    Search(RawSearchResponse),
    Suggest(RawSuggestResponse),
}

/// Raw response of a relevance query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub took: Option<u64>,
    pub hits: RawHits<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<RawAggregations>,
}

/// Raw response of a suggestion lookup; only the name is fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSuggestResponse {
    pub hits: RawHits<NameSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct RawHits<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<RawTotal>,
    #[serde(default)]
    pub hits: Vec<RawHit<S>>,
}

impl<S> Default for RawHits<S> {
    fn default() -> Self {
        Self {
            total: None,
            hits: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTotal {
    pub value: u64,
    #[serde(default)]
    pub relation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHit<S> {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: S,
    /// Field name -> marked-up fragments. Absent when nothing matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameSource {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAggregations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<RawTermsAggregation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_stats: Option<RawStatsAggregation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTermsAggregation {
    #[serde(default)]
    pub buckets: Vec<RawBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBucket {
    pub key: String,
    pub doc_count: u64,
}

/// Stats aggregation. The engine reports `null` for min/max/avg on an empty set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatsAggregation {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default)]
    pub sum: Option<f64>,
}

/// Error body returned by the engine on a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub struct RawErrorBody {
    pub error: Option<serde_json::Value>,
    pub status: Option<u16>,
}
