//! Short link types.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::code::ShortCode;
use crate::error::CoreError;

/// Longest accepted destination URL, in bytes.
pub const MAX_URL_LEN: usize = 2083;

/// A mapping from a short code to its destination.
///
/// Links are immutable once created and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    /// The unique short code.
    pub code: ShortCode,

    /// The destination URL, in normalized form.
    pub long_url: String,

    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Create a new link stamped with the current time.
    #[must_use]
    pub fn new(code: ShortCode, long_url: impl Into<String>) -> Self {
        Self {
            code,
            long_url: long_url.into(),
            created_at: Utc::now().trunc_subsecs(6),
        }
    }
}

/// Parse and normalize a destination URL.
///
/// The URL must be absolute, use the `http` or `https` scheme and carry a
/// host. The returned string is the WHATWG serialization, so a bare origin
/// such as `https://example.com` gains a trailing slash.
///
/// # Errors
///
/// Returns `CoreError::InvalidUrl` if the input is not an acceptable URL.
pub fn normalize_long_url(raw: &str) -> Result<String, CoreError> {
    let raw = raw.trim();
    if raw.len() > MAX_URL_LEN {
        return Err(CoreError::InvalidUrl(format!(
            "url exceeds {MAX_URL_LEN} bytes"
        )));
    }

    let parsed = url::Url::parse(raw).map_err(|e| CoreError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CoreError::InvalidUrl(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(CoreError::InvalidUrl("missing host".into()));
    }

    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_link_keeps_url() {
        let code: ShortCode = "docs".parse().unwrap();
        let link = ShortLink::new(code.clone(), "https://example.com/a?b=c");
        assert_eq!(link.code, code);
        assert_eq!(link.long_url, "https://example.com/a?b=c");
    }

    #[test]
    fn normalize_adds_trailing_slash_to_bare_origin() {
        assert_eq!(
            normalize_long_url("https://example.com").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn normalize_keeps_path_and_query() {
        assert_eq!(
            normalize_long_url("http://example.com/some/path?q=1#frag").unwrap(),
            "http://example.com/some/path?q=1#frag"
        );
    }

    #[test]
    fn normalize_rejects_bad_input() {
        for raw in [
            "",
            "not a url",
            "example.com",
            "ftp://example.com/file",
            "javascript:alert(1)",
            "mailto:someone@example.com",
        ] {
            assert!(
                matches!(normalize_long_url(raw), Err(CoreError::InvalidUrl(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn normalize_rejects_overlong_url() {
        let raw = format!("https://example.com/{}", "a".repeat(MAX_URL_LEN));
        assert!(normalize_long_url(&raw).is_err());
    }
}
