//! Result Types
//!
//! The compact, client-facing shapes produced by the assembler. These are the
//! bodies of `GET /search` and `GET /suggest`, and what the request coordinator
//! keeps on screen.

use crate::catalog::types::Item;
use crate::query::types::{FIELD_DESCRIPTION, FIELD_NAME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered, distinct item names. At most the requested limit.
pub type SuggestionList = Vec<String>;

/// One ranked match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub source: Item,
    /// Field name -> marked-up fragments, only for fields that matched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub highlight: BTreeMap<String, Vec<String>>,
    /// What a renderer shows: highlighted where available, raw value otherwise.
    pub display: HitView,
}

/// Display values of a hit.
///
/// A field with several highlight fragments shows all of them joined with
/// `" ... "`, not only the first. Renderers wanting a single fragment should
/// read [`Hit::fragments`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitView {
    pub name: String,
    pub description: String,
}

impl Hit {
    /// Fragments for `field`, empty when the field did not match.
    pub fn fragments(&self, field: &str) -> &[String] {
        self.highlight
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Display value of `field`; `None` for fields without a display slot.
    pub fn display_field(&self, field: &str) -> Option<&str> {
        match field {
            FIELD_NAME => Some(&self.display.name),
            FIELD_DESCRIPTION => Some(&self.display.description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub key: String,
    pub doc_count: u64,
}

/// Price statistics over the whole matching set.
///
/// All zeros when nothing matched; `min <= avg <= max` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub sum: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub categories: Vec<CategoryBucket>,
    pub price_stats: PriceStats,
}

/// Body of `GET /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total number of matching items reported by the engine.
    #[serde(default)]
    pub total: u64,
    /// Relevance order. A fresh query re-ranks; there is no paging cursor.
    pub hits: Vec<Hit>,
    pub aggregations: Facets,
}
