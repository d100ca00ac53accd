//! Visit statistics handler.

use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use urlshort_core::{format_timestamp, Visit, DEFAULT_RECENT_LIMIT};

use crate::error::ApiError;
use crate::handlers::code_segment;
use crate::links::LinkStats;
use crate::state::AppState;

/// Largest `limit` a caller may ask for.
pub const MAX_RECENT_LIMIT: u32 = 100;

/// Query parameters for the stats endpoint.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Number of recent visits to return, clamped to `1..=100`.
    pub limit: Option<u32>,
}

impl StatsQuery {
    fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT)
    }
}

/// A single visit in the stats response.
#[derive(Debug, Serialize)]
pub struct RecentVisit {
    /// When the visit happened.
    pub ts: String,
    /// Visitor's `User-Agent`.
    pub user_agent: Option<String>,
    /// Visitor's IP address.
    pub ip: Option<String>,
    /// Never populated; no geolocation is performed.
    pub city: Option<String>,
}

impl From<Visit> for RecentVisit {
    fn from(visit: Visit) -> Self {
        Self {
            ts: format_timestamp(&visit.timestamp),
            user_agent: visit.user_agent,
            ip: visit.ip,
            city: visit.city,
        }
    }
}

/// Stats response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// The link's code.
    pub code: String,
    /// The link's destination.
    pub long_url: String,
    /// Number of recorded visits.
    pub total_clicks: u64,
    /// Timestamp of the latest visit, null if never visited.
    pub last_access: Option<String>,
    /// Newest visits first.
    pub recent: Vec<RecentVisit>,
}

impl From<LinkStats> for StatsResponse {
    fn from(LinkStats { link, stats }: LinkStats) -> Self {
        Self {
            code: link.code.into_inner(),
            long_url: link.long_url,
            total_clicks: stats.total,
            last_access: stats.last_access.as_ref().map(format_timestamp),
            recent: stats.recent.into_iter().map(RecentVisit::from).collect(),
        }
    }
}

/// Visit statistics for one link.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<StatsResponse>, ApiError> {
    let code = code_segment(path)?;
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let stats = state.links.get_stats(&code, query.limit()).await?;
    Ok(Json(stats.into()))
}
