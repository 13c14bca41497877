use super::seed::{generate_items, DEFAULT_SEED_COUNT, MAX_SEED_COUNT};
use super::types::{Item, SeedResponse};
use crate::error::{GatewayError, Result};
use crate::search::service::SearchService;

use axum::extract::rejection::JsonRejection;
use axum::extract::Query;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SeedParams {
    pub count: Option<usize>,
}

pub async fn handle_create_index(
    Extension(service): Extension<Arc<SearchService>>,
) -> Result<Json<&'static str>> {
    service.gateway().create_index().await?;
    Ok(Json("Index created"))
}

pub async fn handle_ingest(
    Extension(service): Extension<Arc<SearchService>>,
    payload: std::result::Result<Json<Item>, JsonRejection>,
) -> Result<Json<&'static str>> {
    let Json(item) = payload.map_err(|e| GatewayError::Validation(e.body_text()))?;
    item.validate().map_err(GatewayError::Validation)?;

    service.gateway().index_item(&item).await?;
    tracing::info!("Ingested item {} ({})", item.id, item.name);
    Ok(Json("Product indexed"))
}

pub async fn handle_seed(
    Extension(service): Extension<Arc<SearchService>>,
    Query(params): Query<SeedParams>,
) -> Result<Json<SeedResponse>> {
    let count = params.count.unwrap_or(DEFAULT_SEED_COUNT);
    if count > MAX_SEED_COUNT {
        return Err(GatewayError::Validation(format!(
            "count must be at most {}, got {}",
            MAX_SEED_COUNT, count
        )));
    }

    let items = generate_items(count, &mut rand::thread_rng());
    let indexed = service.gateway().bulk_index(&items).await?;

    tracing::info!("Seeded {} synthetic items", indexed);
    Ok(Json(SeedResponse { indexed }))
}
