//! Storage layer for urlshort.
//!
//! This crate provides persistent storage for short links and their visits.
//!
//! # Architecture
//!
//! Data lives in two tables of a single embedded SQLite file:
//!
//! - `urls`: one row per short link, `code` is unique
//! - `visits`: append-only visit log, ordered by row id
//!
//! Every [`Store`] operation runs in its own transaction. A failed operation
//! leaves nothing behind and returns the error unchanged. There are no
//! transactions spanning several operations.
//!
//! # Example
//!
//! ```no_run
//! use urlshort_core::{ShortCode, ShortLink};
//! use urlshort_store::{SqliteStore, Store};
//!
//! # async fn demo() -> urlshort_store::Result<()> {
//! let store = SqliteStore::open("/tmp/urlshort.db").await?;
//! store.create_schema().await?;
//!
//! let code: ShortCode = "docs".parse().unwrap();
//! store.insert_short_link(&ShortLink::new(code.clone(), "https://example.com/")).await?;
//!
//! let link = store.get_short_link(&code).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use urlshort_core::{ShortCode, ShortLink, Visit, VisitStats};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (SQLite, in-memory for testing).
#[async_trait]
pub trait Store: Send + Sync {
    /// Ensure all tables exist. Safe to call on every start.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn create_schema(&self) -> Result<()>;

    // =========================================================================
    // Link Operations
    // =========================================================================

    /// Insert a new short link.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the code is already taken.
    async fn insert_short_link(&self, link: &ShortLink) -> Result<()>;

    /// Get a short link by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_short_link(&self, code: &ShortCode) -> Result<Option<ShortLink>>;

    /// Check whether a code is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn code_exists(&self, code: &ShortCode) -> Result<bool>;

    // =========================================================================
    // Visit Operations
    // =========================================================================

    /// Append a visit. The referenced link is not checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn insert_visit(&self, visit: &Visit) -> Result<()>;

    /// Count, latest timestamp and the `limit` most recent visits for a code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn visit_stats(&self, code: &ShortCode, limit: u32) -> Result<VisitStats>;
}
