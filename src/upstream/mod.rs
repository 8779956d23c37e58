//! Client for the upstream Mars rover photo API.
//!
//! The upstream API is the source of truth for all rover data; the proxy keeps no copy.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::errors::ProxyError;
use crate::models::{Photo, Rover, UpstreamPhoto};

#[derive(Debug, Deserialize)]
struct RoverListBody {
    rovers: Vec<Rover>,
}

#[derive(Debug, Deserialize)]
struct RoverBody {
    rover: Rover,
}

#[derive(Debug, Deserialize)]
struct PhotoListBody {
    photos: Vec<UpstreamPhoto>,
}

/// Upstream API client for all rover queries.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ProxyError> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url)
            .map_err(|e| ProxyError::Config(format!("Invalid upstream URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProxyError::Config(format!(
                "Invalid upstream URL: {}",
                base_url
            )));
        }
        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// List all rovers, each with an empty photo set.
    pub async fn list_rovers(&self) -> Result<Vec<Rover>, ProxyError> {
        let body: RoverListBody = self.get(&["rovers"], &[]).await?;
        Ok(body
            .rovers
            .into_iter()
            .map(|rover| Rover {
                photos: Vec::new(),
                ..rover
            })
            .collect())
    }

    /// Get a single rover by name.
    pub async fn get_rover(&self, name: &str) -> Result<Rover, ProxyError> {
        let body: RoverBody = self.get(&["rovers", name], &[]).await?;
        Ok(body.rover)
    }

    /// Get the photos a rover took on one earth date, projected to the proxy shape.
    pub async fn photos_on(&self, name: &str, earth_date: &str) -> Result<Vec<Photo>, ProxyError> {
        let body: PhotoListBody = self
            .get(&["rovers", name, "photos"], &[("earth_date", earth_date)])
            .await?;
        Ok(body.photos.into_iter().map(Photo::from).collect())
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ProxyError> {
        // Each segment is percent-encoded, so a name cannot add path or query parts.
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProxyError::Config(format!("Invalid upstream URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        tracing::debug!(path = %url.path(), "Upstream request");

        let response = self
            .http
            .get(url.clone())
            .query(query)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Upstream(format!(
                "Upstream answered {} for {}",
                status,
                url.path()
            )));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
