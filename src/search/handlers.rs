use super::service::SearchService;
use super::types::QueryParams;
use crate::error::{GatewayError, Result};
use crate::results::types::{SearchResult, SuggestionList};

use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_search(
    Extension(service): Extension<Arc<SearchService>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<SearchResult>> {
    let text = params.require_query().map_err(GatewayError::Validation)?;
    let result = service.search(&text).await?;
    Ok(Json(result))
}

pub async fn handle_suggest(
    Extension(service): Extension<Arc<SearchService>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<SuggestionList>> {
    let prefix = params.require_query().map_err(GatewayError::Validation)?;
    let suggestions = service.suggest(&prefix).await?;
    Ok(Json(suggestions))
}
