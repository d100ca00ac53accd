//! In-memory [`Store`] implementation for testing.
//!
//! Uses a `HashMap` and a `Vec` behind `std::sync::RwLock`. Each operation
//! holds the lock for its whole duration, which gives the same all-or-nothing
//! behaviour as a transaction.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use urlshort_core::{ShortCode, ShortLink, Visit, VisitStats};

use crate::error::{Result, StoreError};
use crate::Store;

#[derive(Default)]
struct Tables {
    urls: HashMap<ShortCode, ShortLink>,
    visits: Vec<Visit>,
}

/// In-memory store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_short_link(&self, link: &ShortLink) -> Result<()> {
        let mut tables = self.write()?;
        if tables.urls.contains_key(&link.code) {
            return Err(StoreError::Conflict {
                code: link.code.to_string(),
            });
        }
        tables.urls.insert(link.code.clone(), link.clone());
        Ok(())
    }

    async fn get_short_link(&self, code: &ShortCode) -> Result<Option<ShortLink>> {
        Ok(self.read()?.urls.get(code).cloned())
    }

    async fn code_exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.read()?.urls.contains_key(code))
    }

    async fn insert_visit(&self, visit: &Visit) -> Result<()> {
        self.write()?.visits.push(visit.clone());
        Ok(())
    }

    async fn visit_stats(&self, code: &ShortCode, limit: u32) -> Result<VisitStats> {
        let tables = self.read()?;
        let matching = || tables.visits.iter().filter(move |v| &v.code == code);

        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(VisitStats {
            total: matching().count() as u64,
            last_access: matching().map(|v| v.timestamp).max(),
            recent: matching().rev().take(limit).cloned().collect(),
        })
    }
}
