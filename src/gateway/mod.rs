//! Index Gateway Module
//!
//! The boundary between the gateway and the index engine. Everything the core
//! knows about the engine goes through the [`IndexGateway`] trait: built
//! queries go in, typed raw responses (or an [`EngineError`]) come out.
//!
//! No retries and no backoff happen at this layer.
//!
//! ## Submodules
//! - **`elastic`**: Elasticsearch implementation over HTTP.
//! - **`protocol`**: Typed schemas of the engine's raw responses.

pub mod elastic;
pub mod protocol;

use crate::catalog::types::Item;
use crate::error::EngineError;
use crate::query::types::{RelevanceQuery, SuggestQuery};
use async_trait::async_trait;
use protocol::RawEngineResponse;

/// A built query, ready to be executed.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineQuery {
    Relevance(RelevanceQuery),
    Suggest(SuggestQuery),
}

/// Handle on an index engine.
///
/// Implementations are shared read-only across requests (`Arc<dyn IndexGateway>`).
#[async_trait]
pub trait IndexGateway: Send + Sync {
    /// Executes `query`. A relevance query yields [`RawEngineResponse::Search`],
    /// a suggest query yields [`RawEngineResponse::Suggest`].
    async fn execute(&self, query: &EngineQuery) -> Result<RawEngineResponse, EngineError>;

    /// Creates the catalog index.
    async fn create_index(&self) -> Result<(), EngineError>;

    /// Indexes (or replaces) one item, visible to the next search.
    async fn index_item(&self, item: &Item) -> Result<(), EngineError>;

    /// Indexes a batch of items, visible to the next search. Returns how many were stored.
    async fn bulk_index(&self, items: &[Item]) -> Result<usize, EngineError>;
}
