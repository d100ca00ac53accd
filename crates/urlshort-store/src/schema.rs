//! Database schema definitions.
//!
//! Both tables use an auto-incrementing row id. `urls.code` carries the
//! uniqueness constraint that is the final authority on code allocation.
//! `visits.code` refers to `urls.code` logically but is not enforced, so a
//! visit can be written without a matching link.

/// Table names.
pub mod table {
    /// Short links, one row per code.
    pub const URLS: &str = "urls";

    /// Append-only visit log.
    pub const VISITS: &str = "visits";
}

/// Create the `urls` table.
pub const CREATE_URLS: &str = r"
CREATE TABLE IF NOT EXISTS urls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    long_url TEXT NOT NULL,
    created_at TEXT NOT NULL
)
";

/// Create the `visits` table.
pub const CREATE_VISITS: &str = r"
CREATE TABLE IF NOT EXISTS visits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL,
    ts TEXT NOT NULL,
    user_agent TEXT,
    ip TEXT,
    city TEXT
)
";

/// Index: visits by code in insertion order, for stats queries.
pub const CREATE_VISITS_CODE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_visits_code_id ON visits (code, id)";

/// Returns all schema statements in the order they must run.
#[must_use]
pub fn all_statements() -> Vec<&'static str> {
    vec![CREATE_URLS, CREATE_VISITS, CREATE_VISITS_CODE_INDEX]
}
