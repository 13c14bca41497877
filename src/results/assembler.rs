use super::types::*;
use crate::catalog::types::Item;
use crate::gateway::protocol::*;
use crate::query::types::{FIELD_DESCRIPTION, FIELD_NAME};
use std::collections::{BTreeMap, HashSet};

const FRAGMENT_SEPARATOR: &str = " ... ";

/// Reshapes a raw relevance response into a [`SearchResult`].
///
/// Missing highlights, aggregations or totals map to defaults; this never fails.
pub fn assemble_search_result(raw: RawSearchResponse) -> SearchResult {
    let total = raw
        .hits
        .total
        .as_ref()
        .map(|t| t.value)
        .unwrap_or(raw.hits.hits.len() as u64);

    let hits: Vec<Hit> = raw.hits.hits.into_iter().map(assemble_hit).collect();

    let aggregations = raw.aggregations.unwrap_or_default();
    let categories = aggregations
        .categories
        .map(|terms| {
            terms
                .buckets
                .into_iter()
                .map(|b| CategoryBucket {
                    key: b.key,
                    doc_count: b.doc_count,
                })
                .collect()
        })
        .unwrap_or_default();
    let price_stats = aggregations
        .price_stats
        .map(assemble_price_stats)
        .unwrap_or_default();

    SearchResult {
        total,
        hits,
        aggregations: Facets {
            categories,
            price_stats,
        },
    }
}

/// Extracts the names of a raw suggest response: engine order, no duplicates,
/// at most `limit` entries.
pub fn assemble_suggestions(raw: RawSuggestResponse, limit: usize) -> SuggestionList {
    let mut seen = HashSet::new();
    raw.hits
        .hits
        .into_iter()
        .map(|hit| hit.source.name)
        .filter(|name| seen.insert(name.clone()))
        .take(limit)
        .collect()
}

fn assemble_hit(raw: RawHit<Item>) -> Hit {
    let highlight: BTreeMap<String, Vec<String>> = raw
        .highlight
        .unwrap_or_default()
        .into_iter()
        .map(|(field, fragments)| {
            let fragments: Vec<String> = fragments.into_iter().filter(|f| !f.is_empty()).collect();
            (field, fragments)
        })
        .filter(|(_, fragments)| !fragments.is_empty())
        .collect();

    let display = HitView {
        name: display_value(&highlight, FIELD_NAME, &raw.source.name),
        description: display_value(&highlight, FIELD_DESCRIPTION, &raw.source.description),
    };

    Hit {
        source: raw.source,
        highlight,
        display,
    }
}

/// Highlighted fragments of `field`, or its raw value when it has none.
fn display_value(highlight: &BTreeMap<String, Vec<String>>, field: &str, raw: &str) -> String {
    match highlight.get(field) {
        Some(fragments) => fragments.join(FRAGMENT_SEPARATOR),
        None => raw.to_string(),
    }
}

fn assemble_price_stats(raw: RawStatsAggregation) -> PriceStats {
    if raw.count == 0 {
        return PriceStats::default();
    }

    let finite = |v: Option<f64>| v.filter(|v| v.is_finite()).unwrap_or(0.0);
    let min = finite(raw.min);
    let max = finite(raw.max).max(min);
    // avg = sum / count can drift past min/max by float rounding
    let avg = finite(raw.avg).clamp(min, max);

    PriceStats {
        min,
        max,
        avg,
        sum: finite(raw.sum),
        count: raw.count,
    }
}
