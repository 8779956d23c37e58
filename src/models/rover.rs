//! Rover model shared by the proxy and the client engine.

use serde::{Deserialize, Serialize};

use super::Photo;

/// One camera mounted on a rover. Passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Camera {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub rover_id: i64,
}

/// Rover metadata plus the photos loaded for it so far.
///
/// Every field defaults when missing so a partial upstream record still
/// decodes and renders with blanks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rover {
    pub id: i64,
    pub name: String,
    pub landing_date: String,
    pub launch_date: String,
    pub status: String,
    pub max_sol: i64,
    /// Latest earth date with photos; drives the lazy photo query.
    pub max_date: String,
    pub total_photos: i64,
    pub cameras: Vec<Camera>,
    /// Empty until the detail view has been opened once.
    pub photos: Vec<Photo>,
}

impl Rover {
    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }
}
