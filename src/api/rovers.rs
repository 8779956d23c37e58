//! Rover API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::models::{PhotosResponse, RoverResponse, RoversResponse};
use crate::AppState;

/// Query parameters for the latest photos route.
#[derive(Debug, Deserialize)]
pub struct LatestPhotosQuery {
    /// Earth date (YYYY-MM-DD), forwarded to the upstream API unchanged.
    #[serde(default)]
    pub earth_date: String,
}

/// GET /rovers - List all rovers with empty photo sets.
pub async fn list_rovers(State(state): State<AppState>) -> ApiResult<RoversResponse> {
    let rovers = state.upstream.list_rovers().await?;
    tracing::info!("Listed {} rovers", rovers.len());
    success(RoversResponse::ok(rovers))
}

/// GET /rovers/:name - Get a single rover.
pub async fn get_rover(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<RoverResponse> {
    let rover = state.upstream.get_rover(&name).await?;
    success(RoverResponse::ok(rover))
}

/// GET /rovers/:name/latestphotos?earth_date= - Photos of one rover for one earth date.
pub async fn latest_photos(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<LatestPhotosQuery>,
) -> ApiResult<PhotosResponse> {
    let photos = state.upstream.photos_on(&name, &params.earth_date).await?;
    tracing::info!(
        rover = %name,
        earth_date = %params.earth_date,
        "Fetched {} photos",
        photos.len()
    );
    success(PhotosResponse::ok(photos))
}
