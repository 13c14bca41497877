//! In-Memory Catalog Index
//!
//! Honours the same query contract as the Elasticsearch gateway so the whole
//! stack runs without an external engine:
//! - relevance: per-term fuzzy match (AUTO table) on each field, best field wins,
//!   `<em>` highlighting, terms + stats aggregations over the full match set;
//! - suggest: bool-prefix on the name, every term required.

use super::fuzzy::edit_distance;
use super::tokenizer::{tokenize, tokenize_terms, Token};
use crate::catalog::types::Item;
use crate::error::EngineError;
use crate::gateway::protocol::*;
use crate::gateway::{EngineQuery, IndexGateway};
use crate::query::types::{
    RelevanceQuery, SuggestQuery, FIELD_CATEGORY, FIELD_DESCRIPTION, FIELD_NAME, FIELD_PRICE,
};

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

/// Hits returned per relevance query, as the engine's default page size.
pub const DEFAULT_HIT_COUNT: usize = 10;

pub struct MemoryEngine {
    items: DashMap<String, Item>,
    created: AtomicBool,
}

/// A relevance match before it is cut down to a page of hits.
struct ScoredItem {
    score: f64,
    item: Item,
    highlight: HashMap<String, Vec<String>>,
}

impl MemoryEngine {
    /// An engine with no index yet; see [`IndexGateway::create_index`].
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            created: AtomicBool::new(false),
        }
    }

    /// An engine whose index already holds `items`.
    pub fn with_items(items: Vec<Item>) -> Self {
        let engine = Self::new();
        engine.created.store(true, Ordering::SeqCst);
        for item in items {
            engine.items.insert(item.id.clone(), item);
        }
        engine
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn ensure_index(&self) -> Result<(), EngineError> {
        if self.created.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(EngineError::Validation {
                status: 404,
                debug: "index_not_found_exception: no such index".to_string(),
            })
        }
    }

    fn search(&self, query: &RelevanceQuery) -> RawSearchResponse {
        let terms = tokenize_terms(&query.text);

        let mut matches: Vec<ScoredItem> = self
            .items
            .iter()
            .filter_map(|entry| score_item(entry.value(), query, &terms))
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.item.name.cmp(&b.item.name))
                .then_with(|| a.item.id.cmp(&b.item.id))
        });

        let aggregations = RawAggregations {
            categories: Some(category_buckets(
                &matches,
                &query.aggregations.category_facet.field,
                query.aggregations.category_facet.requested_bucket_count,
            )),
            price_stats: Some(price_stats(&matches, &query.aggregations.price_stats.field)),
        };

        let total = matches.len() as u64;
        let hits = matches
            .into_iter()
            .take(DEFAULT_HIT_COUNT)
            .map(|m| RawHit {
                id: m.item.id.clone(),
                score: Some(m.score),
                highlight: (!m.highlight.is_empty()).then_some(m.highlight),
                source: m.item,
            })
            .collect();

        RawSearchResponse {
            took: Some(0),
            hits: RawHits {
                total: Some(RawTotal {
                    value: total,
                    relation: Some("eq".to_string()),
                }),
                hits,
            },
            aggregations: Some(aggregations),
        }
    }

    fn suggest(&self, query: &SuggestQuery) -> RawSuggestResponse {
        let terms = tokenize_terms(&query.prefix);
        let Some((last, exact)) = terms.split_last() else {
            return RawSuggestResponse::default();
        };

        let mut matches: Vec<(usize, Item)> = self
            .items
            .iter()
            .filter_map(|entry| {
                let item = entry.value();
                let value = field_value(item, &query.field)?;
                let field_terms = tokenize_terms(value);

                if !exact.iter().all(|t| field_terms.contains(t)) {
                    return None;
                }
                let position = field_terms.iter().position(|t| t.starts_with(last.as_str()))?;
                Some((position, item.clone()))
            })
            .collect();

        // Earlier prefix match first, then shorter names
        matches.sort_by(|(pa, a), (pb, b)| {
            pa.cmp(pb)
                .then_with(|| a.name.len().cmp(&b.name.len()))
                .then_with(|| a.name.cmp(&b.name))
        });

        let total = matches.len() as u64;
        let hits = matches
            .into_iter()
            .take(query.limit)
            .map(|(_, item)| RawHit {
                id: item.id,
                score: None,
                source: NameSource { name: item.name },
                highlight: None,
            })
            .collect();

        RawSuggestResponse {
            hits: RawHits {
                total: Some(RawTotal {
                    value: total,
                    relation: Some("eq".to_string()),
                }),
                hits,
            },
        }
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexGateway for MemoryEngine {
    async fn execute(&self, query: &EngineQuery) -> Result<RawEngineResponse, EngineError> {
        self.ensure_index()?;
        match query {
            EngineQuery::Relevance(q) => Ok(RawEngineResponse::Search(self.search(q))),
            EngineQuery::Suggest(q) => Ok(RawEngineResponse::Suggest(self.suggest(q))),
        }
    }

    async fn create_index(&self) -> Result<(), EngineError> {
        if self.created.swap(true, Ordering::SeqCst) {
            return Err(EngineError::Validation {
                status: 400,
                debug: "resource_already_exists_exception: index already exists".to_string(),
            });
        }
        tracing::info!("Created in-memory index");
        Ok(())
    }

    async fn index_item(&self, item: &Item) -> Result<(), EngineError> {
        self.created.store(true, Ordering::SeqCst);
        self.items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn bulk_index(&self, items: &[Item]) -> Result<usize, EngineError> {
        self.created.store(true, Ordering::SeqCst);
        for item in items {
            self.items.insert(item.id.clone(), item.clone());
        }
        Ok(items.len())
    }
}

fn field_value<'a>(item: &'a Item, field: &str) -> Option<&'a str> {
    match field {
        FIELD_NAME => Some(&item.name),
        FIELD_DESCRIPTION => Some(&item.description),
        FIELD_CATEGORY => Some(&item.category),
        _ => None,
    }
}

fn numeric_value(item: &Item, field: &str) -> Option<f64> {
    match field {
        FIELD_PRICE => Some(item.price),
        _ => None,
    }
}

/// Scores `item` against the query terms. `None` when nothing matched.
fn score_item(item: &Item, query: &RelevanceQuery, terms: &[String]) -> Option<ScoredItem> {
    if terms.is_empty() {
        // Zero terms match everything
        return Some(ScoredItem {
            score: 1.0,
            item: item.clone(),
            highlight: HashMap::new(),
        });
    }

    let mut best = 0.0_f64;
    let mut highlight = HashMap::new();

    for field in &query.fields {
        let Some(value) = field_value(item, field) else {
            continue;
        };
        let tokens = tokenize(value);
        let mut field_score = 0.0;
        let mut matched = vec![false; tokens.len()];

        for term in terms {
            let max_edits = query.fuzziness.max_edits(term.chars().count());
            let mut best_distance: Option<usize> = None;

            for (i, token) in tokens.iter().enumerate() {
                if let Some(d) = edit_distance(term, &token.term, max_edits) {
                    matched[i] = true;
                    best_distance = Some(best_distance.map_or(d, |b| b.min(d)));
                }
            }

            if let Some(d) = best_distance {
                field_score += 1.0 / (1.0 + d as f64);
            }
        }

        if field_score > 0.0 && query.highlight_fields.iter().any(|f| f == field) {
            highlight.insert(field.clone(), vec![mark_up(value, &tokens, &matched)]);
        }
        best = best.max(field_score);
    }

    (best > 0.0).then(|| ScoredItem {
        score: best,
        item: item.clone(),
        highlight,
    })
}

/// Wraps every matched token of `value` in the highlight tags.
fn mark_up(value: &str, tokens: &[Token], matched: &[bool]) -> String {
    let mut out = String::with_capacity(value.len() + 16);
    let mut cursor = 0;

    for (token, _) in tokens.iter().zip(matched).filter(|(_, m)| **m) {
        out.push_str(&value[cursor..token.start]);
        out.push_str(HIGHLIGHT_PRE_TAG);
        out.push_str(&value[token.start..token.end]);
        out.push_str(HIGHLIGHT_POST_TAG);
        cursor = token.end;
    }
    out.push_str(&value[cursor..]);
    out
}

/// Terms aggregation: descending count, then key, at most `size` buckets.
fn category_buckets(matches: &[ScoredItem], field: &str, size: usize) -> RawTermsAggregation {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for m in matches {
        if let Some(key) = field_value(&m.item, field) {
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
    }

    let mut buckets: Vec<RawBucket> = counts
        .into_iter()
        .map(|(key, doc_count)| RawBucket { key, doc_count })
        .collect();
    buckets.sort_by(|a, b| b.doc_count.cmp(&a.doc_count).then_with(|| a.key.cmp(&b.key)));
    buckets.truncate(size);

    RawTermsAggregation { buckets }
}

fn price_stats(matches: &[ScoredItem], field: &str) -> RawStatsAggregation {
    let values: Vec<f64> = matches
        .iter()
        .filter_map(|m| numeric_value(&m.item, field))
        .collect();

    if values.is_empty() {
        return RawStatsAggregation {
            count: 0,
            min: None,
            max: None,
            avg: None,
            sum: Some(0.0),
        };
    }

    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    RawStatsAggregation {
        count: values.len() as u64,
        min: Some(min),
        max: Some(max),
        avg: Some(sum / values.len() as f64),
        sum: Some(sum),
    }
}
