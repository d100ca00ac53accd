//! Link creation and redirect handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use serde::{Deserialize, Serialize};

use urlshort_core::normalize_long_url;

use crate::error::ApiError;
use crate::handlers::code_segment;
use crate::links::ShortenOutcome;
use crate::request::RequestContext;
use crate::state::AppState;

/// Shorten request body.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// Destination URL, absolute `http` or `https`.
    pub url: String,

    /// Requested code. Blank counts as absent.
    #[serde(default)]
    pub custom_code: Option<String>,
}

impl ShortenRequest {
    /// The trimmed custom code, if one was actually supplied.
    fn custom_code(&self) -> Option<&str> {
        self.custom_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Shorten response.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// The allocated code.
    pub code: String,
    /// Full short URL.
    pub short_url: String,
    /// The stored destination.
    pub long_url: String,
}

impl From<ShortenOutcome> for ShortenResponse {
    fn from(outcome: ShortenOutcome) -> Self {
        Self {
            code: outcome.link.code.into_inner(),
            short_url: outcome.short_url,
            long_url: outcome.link.long_url,
        }
    }
}

/// Create a short link.
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::Unprocessable(e.body_text()))?;

    let long_url =
        normalize_long_url(&body.url).map_err(|e| ApiError::Unprocessable(e.to_string()))?;
    let base_url = ctx.base_url(&state.config.public_base_url);

    let outcome = state
        .links
        .shorten(&long_url, body.custom_code(), &base_url)
        .await?;

    Ok(Json(outcome.into()))
}

/// Redirect to the destination of `code`, recording the visit.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    ctx: RequestContext,
) -> Result<Redirect, ApiError> {
    let code = code_segment(path)?;
    let long_url = state.links.resolve_and_log(&code, &ctx).await?;
    Ok(Redirect::temporary(&long_url))
}
