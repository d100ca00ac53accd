//! Visit records and aggregated visit statistics.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::code::ShortCode;
use crate::error::CoreError;

/// Number of recent visits returned by stats queries when no limit is given.
pub const DEFAULT_RECENT_LIMIT: u32 = 20;

/// One recorded redirect.
///
/// Visits are append-only. Their order is the insertion order of the store,
/// not the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// Code of the link that was followed.
    pub code: ShortCode,

    /// When the redirect happened.
    pub timestamp: DateTime<Utc>,

    /// Raw `User-Agent` header, if sent.
    pub user_agent: Option<String>,

    /// Client IP address, if known.
    pub ip: Option<String>,

    /// Client city. Reserved; there is no geo-IP source so this is always `None`.
    pub city: Option<String>,
}

impl Visit {
    /// Create a visit stamped with the current time.
    #[must_use]
    pub fn new(code: ShortCode, user_agent: Option<String>, ip: Option<String>) -> Self {
        Self {
            code,
            timestamp: Utc::now().trunc_subsecs(6),
            user_agent,
            ip,
            city: None,
        }
    }
}

/// Aggregate view of the visits for one code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitStats {
    /// Total number of visits.
    pub total: u64,

    /// Timestamp of the latest visit, `None` if there were none.
    pub last_access: Option<DateTime<Utc>>,

    /// Most recently recorded visits, newest first.
    pub recent: Vec<Visit>,
}

/// Format a timestamp for storage.
///
/// Always microsecond precision with an explicit `+00:00` offset, so stored
/// values sort lexically in chronological order.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse a stored RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `CoreError::Timestamp` if the value is not valid RFC 3339.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::Timestamp(format!("{raw}: {e}")))
}
