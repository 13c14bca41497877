use super::types::*;

/// Builds the static aggregation descriptor for a relevance search.
pub fn aggregation_spec(category_buckets: usize) -> AggregationSpec {
    AggregationSpec {
        category_facet: CategoryFacet {
            field: FIELD_CATEGORY.to_string(),
            requested_bucket_count: category_buckets.max(1),
        },
        price_stats: PriceStatsSpec {
            field: FIELD_PRICE.to_string(),
        },
    }
}

/// Builds the full-text query for an explicit search.
///
/// The text is passed through untouched, including the empty string.
pub fn build_relevance_query(text: &str) -> RelevanceQuery {
    build_relevance_query_with(text, DEFAULT_CATEGORY_BUCKETS)
}

/// Same as [`build_relevance_query`] with a configured facet size.
pub fn build_relevance_query_with(text: &str, category_buckets: usize) -> RelevanceQuery {
    let fields = vec![FIELD_NAME.to_string(), FIELD_DESCRIPTION.to_string()];

    RelevanceQuery {
        text: text.to_string(),
        highlight_fields: fields.clone(),
        fields,
        fuzziness: Fuzziness::Auto,
        aggregations: aggregation_spec(category_buckets),
    }
}

/// Builds the autocomplete lookup for `prefix`.
///
/// Returns `None` for an empty prefix: there is nothing to ask the engine.
pub fn build_suggest_query(prefix: &str) -> Option<SuggestQuery> {
    if prefix.is_empty() {
        return None;
    }

    Some(SuggestQuery {
        prefix: prefix.to_string(),
        field: FIELD_NAME.to_string(),
        limit: DEFAULT_SUGGEST_LIMIT,
    })
}
