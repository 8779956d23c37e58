//! Photo records, as the upstream API sends them and as the proxy reshapes them.

use serde::{Deserialize, Serialize};

use super::Camera;

/// A photo as served by the proxy: the camera is reduced to its id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Photo {
    pub img_src: String,
    pub sol: i64,
    #[serde(alias = "earth_day")]
    pub earth_date: String,
    pub camera: i64,
}

/// A photo as the upstream API returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamPhoto {
    pub sol: i64,
    pub camera: Camera,
    pub img_src: String,
    pub earth_date: String,
}

impl From<UpstreamPhoto> for Photo {
    fn from(photo: UpstreamPhoto) -> Self {
        Self {
            img_src: photo.img_src,
            sol: photo.sol,
            earth_date: photo.earth_date,
            camera: photo.camera.id,
        }
    }
}
