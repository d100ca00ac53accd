//! Health check handler.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `true` while the process serves requests.
    pub ok: bool,
}

/// Liveness probe. Does not touch the store.
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
