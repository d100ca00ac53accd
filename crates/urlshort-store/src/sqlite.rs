//! SQLite storage implementation.
//!
//! This module provides the `SqliteStore` implementation of the `Store` trait.
//! The database runs in WAL mode: one writer at a time, readers do not block.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use urlshort_core::{
    format_timestamp, parse_timestamp, ShortCode, ShortLink, Visit, VisitStats,
};

use crate::error::{Result, StoreError};
use crate::schema;
use crate::Store;

/// Maximum pooled connections for a file-backed store.
const MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed storage implementation.
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    code: String,
    long_url: String,
    created_at: String,
}

#[derive(sqlx::FromRow)]
struct VisitRow {
    code: String,
    ts: String,
    user_agent: Option<String>,
    ip: Option<String>,
    city: Option<String>,
}

impl TryFrom<UrlRow> for ShortLink {
    type Error = StoreError;

    fn try_from(row: UrlRow) -> Result<Self> {
        Ok(Self {
            code: ShortCode::try_from(row.code)?,
            long_url: row.long_url,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

impl TryFrom<VisitRow> for Visit {
    type Error = StoreError;

    fn try_from(row: VisitRow) -> Result<Self> {
        Ok(Self {
            code: ShortCode::try_from(row.code)?,
            timestamp: parse_timestamp(&row.ts)?,
            user_agent: row.user_agent,
            ip: row.ip,
            city: row.city,
        })
    }
}

impl SqliteStore {
    /// Open or create a database file at the given path.
    ///
    /// Missing parent directories are created. The schema is not touched;
    /// call [`Store::create_schema`] before use.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created or opened.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Database(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::debug!(path = %path.display(), "SQLite store opened");

        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// The pool holds exactly one connection that is never recycled, since an
    /// in-memory database disappears with its last connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Map an insert failure, turning a unique-constraint violation into a conflict.
fn insert_error(err: sqlx::Error, code: &ShortCode) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict {
            code: code.to_string(),
        },
        _ => err.into(),
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn create_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for statement in schema::all_statements() {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    // Link Operations
    // =========================================================================

    async fn insert_short_link(&self, link: &ShortLink) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO urls (code, long_url, created_at) VALUES (?, ?, ?)")
            .bind(link.code.as_str())
            .bind(&link.long_url)
            .bind(format_timestamp(&link.created_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(e, &link.code))?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_short_link(&self, code: &ShortCode) -> Result<Option<ShortLink>> {
        let mut tx = self.pool.begin().await?;

        let row: Option<UrlRow> =
            sqlx::query_as("SELECT code, long_url, created_at FROM urls WHERE code = ?")
                .bind(code.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        tx.commit().await?;
        row.map(ShortLink::try_from).transpose()
    }

    async fn code_exists(&self, code: &ShortCode) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT COUNT(*) > 0 FROM urls WHERE code = ?")
            .bind(code.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(exists)
    }

    // =========================================================================
    // Visit Operations
    // =========================================================================

    async fn insert_visit(&self, visit: &Visit) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO visits (code, ts, user_agent, ip, city) VALUES (?, ?, ?, ?, ?)")
            .bind(visit.code.as_str())
            .bind(format_timestamp(&visit.timestamp))
            .bind(visit.user_agent.as_deref())
            .bind(visit.ip.as_deref())
            .bind(visit.city.as_deref())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn visit_stats(&self, code: &ShortCode, limit: u32) -> Result<VisitStats> {
        let mut tx = self.pool.begin().await?;

        let (count, last): (i64, Option<String>) =
            sqlx::query_as("SELECT COUNT(*), MAX(ts) FROM visits WHERE code = ?")
                .bind(code.as_str())
                .fetch_one(&mut *tx)
                .await?;

        let rows: Vec<VisitRow> = sqlx::query_as(
            "SELECT code, ts, user_agent, ip, city FROM visits WHERE code = ? ORDER BY id DESC LIMIT ?",
        )
        .bind(code.as_str())
        .bind(i64::from(limit))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(VisitStats {
            total: u64::try_from(count)
                .map_err(|_| StoreError::Serialization(format!("negative visit count: {count}")))?,
            last_access: last.as_deref().map(parse_timestamp).transpose()?,
            recent: rows
                .into_iter()
                .map(Visit::try_from)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}
