//! Coordinator Backends
//!
//! Where the coordinator sends its requests. [`HttpSearchClient`] talks to a
//! running gateway over HTTP; [`LocalBackend`] calls a [`SearchService`]
//! in-process.

use crate::error::{ClientError, ErrorBody};
use crate::results::types::{SearchResult, SuggestionList};
use crate::search::service::SearchService;
use crate::search::types::{ENDPOINT_SEARCH, ENDPOINT_SUGGEST};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    async fn suggest(&self, prefix: &str) -> Result<SuggestionList, ClientError>;

    async fn search(&self, text: &str) -> Result<SearchResult, ClientError>;
}

/// Calls the search pipeline directly.
pub struct LocalBackend {
    service: Arc<SearchService>,
}

impl LocalBackend {
    pub fn new(service: Arc<SearchService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SearchBackend for LocalBackend {
    async fn suggest(&self, prefix: &str) -> Result<SuggestionList, ClientError> {
        Ok(self.service.suggest(prefix).await?)
    }

    async fn search(&self, text: &str) -> Result<SearchResult, ClientError> {
        Ok(self.service.search(text).await?)
    }
}

/// HTTP client for a running gateway.
#[derive(Clone)]
pub struct HttpSearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSearchClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &str) -> Result<T, ClientError> {
        let url = format!(
            "{}{}?query={}",
            self.base_url,
            endpoint,
            urlencoding::encode(query)
        );

        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let (kind, message) = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => (body.kind, body.error),
                Err(_) => ("unknown".to_string(), text),
            };
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                kind,
                message,
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    async fn suggest(&self, prefix: &str) -> Result<SuggestionList, ClientError> {
        self.get(ENDPOINT_SUGGEST, prefix).await
    }

    async fn search(&self, text: &str) -> Result<SearchResult, ClientError> {
        self.get(ENDPOINT_SEARCH, text).await
    }
}

/// Adds a scheme when missing and drops trailing slashes.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();

    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    normalized.trim_end_matches('/').to_string()
}
