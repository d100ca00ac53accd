//! Service configuration.

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8000").
    pub listen_addr: String,

    /// Path to the SQLite database file (default: "data/urlshort.db").
    pub db_path: String,

    /// Log filter directive, case-insensitive (default: "info").
    pub log_level: String,

    /// Directory for rotated log files, written in addition to the console.
    pub log_dir: Option<String>,

    /// Log output format, "text" or "json" (default: "text").
    pub log_format: String,

    /// Base URL used for short links when a request carries no host information.
    pub public_base_url: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset, empty or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            listen_addr: var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            db_path: var("DB_PATH").unwrap_or(defaults.db_path),
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: var("LOG_DIR"),
            log_format: var("LOG_FORMAT").unwrap_or(defaults.log_format),
            public_base_url: var("PUBLIC_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_base_url),
            cors_origins: var("CORS_ORIGINS").map_or(defaults.cors_origins, |s| {
                s.split(',').map(|s| s.trim().to_string()).collect()
            }),
            max_body_bytes: var("MAX_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: var("REQUEST_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }

    /// Whether logs should be emitted as JSON.
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".into(),
            db_path: "data/urlshort.db".into(),
            log_level: "info".into(),
            log_dir: None,
            log_format: "text".into(),
            public_base_url: "http://localhost:8000".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
