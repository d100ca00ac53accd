//! API handlers.

use axum::extract::rejection::PathRejection;
use axum::extract::Path;

use crate::error::ApiError;

pub mod health;
pub mod links;
pub mod qr;
pub mod stats;

/// The `:code` path segment. A segment that cannot be decoded names no link.
fn code_segment(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(code)| code)
        .map_err(|_| ApiError::NotFound("Not found".into()))
}
