//! Configuration module for the Mars dashboard proxy.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ProxyError;

/// Default base URL of the upstream rover photo API.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.nasa.gov/mars-photos/api/v1";

/// Output format for the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ProxyError::Config(format!("Invalid MARS_LOG_FORMAT: {}", s))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key forwarded to the upstream API
    pub api_key: String,
    /// Base URL of the upstream rover API
    pub upstream_url: String,
    /// Timeout applied to each upstream request
    pub upstream_timeout: Duration,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Directory holding the front-end bundle (index.html, images/)
    pub static_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ProxyError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string());

        let upstream_url = env::var("MARS_UPSTREAM_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs =
            env::var("MARS_UPSTREAM_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string());
        let upstream_timeout = timeout_secs
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                ProxyError::Config(format!("Invalid MARS_UPSTREAM_TIMEOUT_SECS: {}", timeout_secs))
            })?;

        let bind = env::var("MARS_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|_| ProxyError::Config(format!("Invalid MARS_BIND_ADDR format: {}", bind)))?;

        let static_dir = env::var("MARS_STATIC_DIR")
            .unwrap_or_else(|_| "dist".to_string())
            .into();

        let log_level = env::var("MARS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let format = env::var("MARS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let log_format: LogFormat = format.parse()?;

        Ok(Self {
            api_key,
            upstream_url,
            upstream_timeout,
            bind_addr,
            static_dir,
            log_level,
            log_format,
        })
    }
}
