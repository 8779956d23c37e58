//! Data models for the Mars rover dashboard.
//!
//! Field names follow the upstream API's snake_case JSON, which the proxy forwards as-is.

mod envelope;
mod photo;
mod rover;

pub use envelope::*;
pub use photo::*;
pub use rover::*;
