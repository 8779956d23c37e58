//! Error handling module for the Mars dashboard proxy.
//!
//! Every upstream failure collapses into the same JSON envelope, served with HTTP 200
//! so the browser client reads the `success` flag instead of the status line.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Code and message carried by the error envelope.
pub const INTERNAL_ERROR_CODE: u16 = 500;
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application error type.
#[derive(Debug)]
pub enum ProxyError {
    /// Upstream unreachable or answered with a non-success status
    Upstream(String),
    /// Upstream body was not the JSON we expected
    Decode(String),
    /// Invalid configuration at startup
    Config(String),
}

impl ProxyError {
    /// Get the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::Upstream(_) => "upstream",
            ProxyError::Decode(_) => "decode",
            ProxyError::Config(_) => "config",
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ProxyError::Upstream(msg) => msg.clone(),
            ProxyError::Decode(msg) => msg.clone(),
            ProxyError::Config(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for ProxyError {}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Upstream error: {:?}", err);
        if err.is_decode() {
            ProxyError::Decode(format!("Upstream body error: {}", err))
        } else {
            ProxyError::Upstream(format!("Upstream request error: {}", err))
        }
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ProxyError::Decode(format!("JSON error: {}", err))
    }
}

/// Error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: u16,
    pub message: String,
}

impl ErrorResponse {
    /// The one error body the proxy ever sends; upstream details stay in the logs.
    pub fn internal() -> Self {
        Self {
            success: false,
            code: INTERNAL_ERROR_CODE,
            message: INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = self.kind(), "Answering with error envelope: {}", self.message());
        (StatusCode::OK, Json(ErrorResponse::internal())).into_response()
    }
}
