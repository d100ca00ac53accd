//! QR code handler.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::error::ApiError;
use crate::handlers::code_segment;
use crate::qr::render_png;
use crate::request::RequestContext;
use crate::state::AppState;

/// PNG QR code encoding the short URL of `code`.
pub async fn get_qr(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, ApiError> {
    let code = code_segment(path)?;
    let link = state.links.lookup(&code).await?;
    let short_url = format!(
        "{}/{}",
        ctx.base_url(&state.config.public_base_url),
        link.code
    );

    let png = render_png(&short_url)?;
    Ok(([(CONTENT_TYPE, "image/png")], png))
}
