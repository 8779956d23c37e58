//! REST API module.
//!
//! Contains the three read-only rover routes the browser client consumes.

mod rovers;

pub use rovers::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::ProxyError;

/// Success response wrapper; the envelope itself carries `success: true`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, ProxyError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse(data))
}
