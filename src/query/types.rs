//! Query Types
//!
//! Engine-agnostic descriptions of the two query shapes the gateway sends:
//! a ranked full-text search and an autocomplete suggestion lookup.

use serde::{Deserialize, Serialize};

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_PRICE: &str = "price";

/// Number of suggestions requested per lookup.
pub const DEFAULT_SUGGEST_LIMIT: usize = 5;
/// Number of category buckets requested per relevance search.
pub const DEFAULT_CATEGORY_BUCKETS: usize = 10;

/// Edit-distance policy for fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fuzziness {
    /// The engine's standard length-based table.
    Auto,
}

impl Fuzziness {
    /// Maximum number of edits tolerated for a term of `term_len` characters.
    ///
    /// Terms of 0..=2 chars must match exactly, 3..=5 tolerate one edit,
    /// longer terms tolerate two.
    pub fn max_edits(self, term_len: usize) -> usize {
        match self {
            Fuzziness::Auto => match term_len {
                0..=2 => 0,
                3..=5 => 1,
                _ => 2,
            },
        }
    }

    /// Wire representation understood by the engine.
    pub fn as_str(self) -> &'static str {
        match self {
            Fuzziness::Auto => "AUTO",
        }
    }
}

/// Terms facet over the category keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFacet {
    pub field: String,
    pub requested_bucket_count: usize,
}

/// Min/max/avg/sum/count statistics over the price field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatsSpec {
    pub field: String,
}

/// Aggregations attached to every relevance search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationSpec {
    pub category_facet: CategoryFacet,
    pub price_stats: PriceStatsSpec,
}

/// A ranked, fuzzy, highlighted full-text query over name and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceQuery {
    /// Raw user text. May be empty; the engine is asked to treat that as match-all.
    pub text: String,
    /// Fields the text is matched against, in order. Never empty.
    pub fields: Vec<String>,
    pub fuzziness: Fuzziness,
    pub highlight_fields: Vec<String>,
    pub aggregations: AggregationSpec,
}

/// A bool-prefix autocomplete lookup on the name field.
///
/// Every token but the last must match exactly; the last matches as a prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestQuery {
    /// Never empty.
    pub prefix: String,
    pub field: String,
    pub limit: usize,
}
