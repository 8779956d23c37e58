//! Response envelopes exchanged between the proxy and the client engine.
//!
//! Payload fields default when absent so an error envelope
//! (`{success: false, code, message}`) decodes into any of these shapes.

use serde::{Deserialize, Serialize};

use super::{Photo, Rover};

/// Body of `GET /rovers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoversResponse {
    pub success: bool,
    #[serde(default)]
    pub rovers: Vec<Rover>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `GET /rovers/{name}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoverResponse {
    pub success: bool,
    #[serde(default)]
    pub rover: Rover,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `GET /rovers/{name}/latestphotos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PhotosResponse {
    pub success: bool,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RoversResponse {
    pub fn ok(rovers: Vec<Rover>) -> Self {
        Self {
            success: true,
            rovers,
            ..Self::default()
        }
    }
}

impl RoverResponse {
    pub fn ok(rover: Rover) -> Self {
        Self {
            success: true,
            rover,
            ..Self::default()
        }
    }
}

impl PhotosResponse {
    pub fn ok(photos: Vec<Photo>) -> Self {
        Self {
            success: true,
            photos,
            ..Self::default()
        }
    }
}
