use catalog_search::config::{Config, EngineKind};
use catalog_search::engine::index::MemoryEngine;
use catalog_search::gateway::elastic::ElasticGateway;
use catalog_search::gateway::IndexGateway;
use catalog_search::router;
use catalog_search::search::service::SearchService;

use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .init();

    // 1. Index engine handle:
    let gateway: Arc<dyn IndexGateway> = match config.engine {
        EngineKind::Elasticsearch => {
            tracing::info!(
                "Using Elasticsearch at {} (index: {})",
                config.elasticsearch_url,
                config.index
            );
            let client = reqwest::Client::builder().build()?;
            Arc::new(
                ElasticGateway::new(client, &config.elasticsearch_url, &config.index)
                    .with_timeout(config.engine_timeout()),
            )
        }
        EngineKind::Memory => {
            tracing::info!("Using the in-memory engine");
            Arc::new(MemoryEngine::new())
        }
    };

    // 2. Search pipeline:
    let service = Arc::new(SearchService::with_category_buckets(
        gateway,
        config.category_buckets,
    ));

    // 3. HTTP server:
    let app = router(service);

    tracing::info!("HTTP server listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
