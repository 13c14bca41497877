//! Gateway configuration
//!
//! Every option can be given as a flag or through its environment variable.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// An Elasticsearch-compatible engine over HTTP.
    Elasticsearch,
    /// The in-process engine (development, demos).
    Memory,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "catalog-search")]
#[command(about = "Search gateway for the catalog index")]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "GATEWAY_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Index engine backend
    #[arg(long, env = "SEARCH_ENGINE", value_enum, default_value = "elasticsearch")]
    pub engine: EngineKind,

    /// Base URL of the Elasticsearch engine
    #[arg(long, env = "ELASTICSEARCH_URI", default_value = "http://elasticsearch:9200")]
    pub elasticsearch_url: String,

    /// Name of the catalog index
    #[arg(long, env = "SEARCH_INDEX", default_value = "products")]
    pub index: String,

    /// Category buckets requested per search
    #[arg(long, env = "CATEGORY_BUCKETS", default_value_t = 10)]
    pub category_buckets: usize,

    /// Per-request engine timeout in milliseconds (transport default when unset)
    #[arg(long, env = "ENGINE_TIMEOUT_MS")]
    pub engine_timeout_ms: Option<u64>,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn engine_timeout(&self) -> Option<Duration> {
        self.engine_timeout_ms.map(Duration::from_millis)
    }
}
