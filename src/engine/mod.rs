//! In-Memory Engine Module
//!
//! A small in-process index implementing [`crate::gateway::IndexGateway`].
//! Used for local development (`--engine memory`) and end-to-end tests; it
//! follows the same query contract as the Elasticsearch gateway.
//!
//! ## Submodules
//! - **`index`**: Storage, relevance scoring, aggregations and suggestions.
//! - **`tokenizer`**: Lowercased word tokens with byte offsets.
//! - **`fuzzy`**: Bounded edit distance for fuzzy term matching.

pub mod fuzzy;
pub mod index;
pub mod tokenizer;
