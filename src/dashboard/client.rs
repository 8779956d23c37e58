//! Proxy client used by the dashboard.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::decision::{with_segments, Request};
use crate::models::{PhotosResponse, RoverResponse, RoversResponse};

/// Client-side error type.
#[derive(Debug)]
pub enum ClientError {
    /// Request never produced a response
    Transport(String),
    /// Response body was not the expected JSON
    Decode(String),
    /// Proxy answered with `success: false`
    Rejected { code: Option<u16>, message: String },
    /// Proxy base URL cannot carry a path
    InvalidUrl(String),
}

impl ClientError {
    /// Turn an unsuccessful envelope into an error.
    pub fn rejected(code: Option<u16>, message: Option<String>) -> Self {
        ClientError::Rejected {
            code,
            message: message.unwrap_or_else(|| "request rejected".to_string()),
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "transport: {}", msg),
            ClientError::Decode(msg) => write!(f, "decode: {}", msg),
            ClientError::Rejected {
                code: Some(code),
                message,
            } => write!(f, "rejected ({}): {}", code, message),
            ClientError::Rejected { code: None, message } => write!(f, "rejected: {}", message),
            ClientError::InvalidUrl(url) => write!(f, "invalid proxy url: {}", url),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Proxy request error: {:?}", err);
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Proxy body error: {:?}", err);
        ClientError::Decode(err.to_string())
    }
}

/// The three proxy queries.
#[async_trait]
pub trait RoverApi: Send + Sync {
    async fn rovers(&self) -> Result<RoversResponse, ClientError>;

    async fn rover(&self, name: &str) -> Result<RoverResponse, ClientError>;

    async fn latest_photos(
        &self,
        name: &str,
        earth_date: &str,
    ) -> Result<PhotosResponse, ClientError>;
}

/// [`RoverApi`] over HTTP against the proxy.
#[derive(Clone)]
pub struct ProxyClient {
    http: Client,
    base_url: Url,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    fn request_url(&self, request: &Request) -> Result<Url, ClientError> {
        request
            .url(&self.base_url)
            .ok_or_else(|| ClientError::InvalidUrl(self.base_url.to_string()))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        tracing::debug!(%url, "Proxy request");
        let bytes = self.http.get(url).send().await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl RoverApi for ProxyClient {
    async fn rovers(&self) -> Result<RoversResponse, ClientError> {
        let url = self.request_url(&Request::Rovers)?;
        self.get(url).await
    }

    async fn rover(&self, name: &str) -> Result<RoverResponse, ClientError> {
        let url = with_segments(&self.base_url, &["rovers", name])
            .ok_or_else(|| ClientError::InvalidUrl(self.base_url.to_string()))?;
        self.get(url).await
    }

    async fn latest_photos(
        &self,
        name: &str,
        earth_date: &str,
    ) -> Result<PhotosResponse, ClientError> {
        let url = self.request_url(&Request::LatestPhotos {
            rover: name.to_string(),
            earth_date: earth_date.to_string(),
        })?;
        self.get(url).await
    }
}
