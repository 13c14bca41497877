//! Error types for the search gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure talking to the index engine.
///
/// Every variant carries the engine's diagnostic text so it can be logged.
/// Result types never embed it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Connection refused, DNS failure, timeout, broken body stream.
    #[error("Engine transport error: {0}")]
    Transport(String),

    /// The engine rejected the request (4xx).
    #[error("Engine rejected request ({status}): {debug}")]
    Validation { status: u16, debug: String },

    /// The engine failed (5xx) or answered with something we could not decode.
    #[error("Engine server error ({status}): {debug}")]
    Server { status: u16, debug: String },
}

impl EngineError {
    /// Builds the error matching an engine HTTP status.
    pub fn from_status(status: u16, debug: impl Into<String>) -> Self {
        let debug = debug.into();
        if (400..500).contains(&status) {
            EngineError::Validation { status, debug }
        } else {
            EngineError::Server { status, debug }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Transport(_) => "transport",
            EngineError::Validation { .. } => "validation",
            EngineError::Server { .. } => "server",
        }
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => EngineError::from_status(status.as_u16(), err.to_string()),
            None => EngineError::Transport(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Error surfaced by the HTTP endpoints.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Malformed or missing request input, rejected before any query is built.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// JSON body of every non-success gateway response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let kind = match &self {
            GatewayError::Validation(_) => "validation".to_string(),
            GatewayError::Engine(e) => {
                tracing::error!(kind = e.kind(), "Index engine call failed: {}", e);
                format!("engine_{}", e.kind())
            }
        };

        // Engine failures stay client-visible 400s with their debug text
        let body = ErrorBody {
            error: self.to_string(),
            kind,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Failure seen by a client-side backend (see `coordinator::backend`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Gateway unreachable: {0}")]
    Transport(String),

    #[error("Gateway rejected request ({status}, {kind}): {message}")]
    Rejected {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("Invalid gateway response: {0}")]
    Decode(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ClientError {
    /// Whether re-issuing the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Rejected { kind, .. } => !kind.ends_with("validation"),
            ClientError::Decode(_) => false,
            ClientError::Engine(e) => !matches!(e, EngineError::Validation { .. }),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
