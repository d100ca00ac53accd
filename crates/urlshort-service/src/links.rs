//! Link creation, redirect resolution and visit statistics.
//!
//! `LinkService` is request-scoped logic over a shared store handle. It keeps
//! no state of its own.

use std::sync::Arc;

use urlshort_core::{ShortCode, ShortLink, Visit, VisitStats};
use urlshort_store::Store;

use crate::allocator::CodeAllocator;
use crate::error::ServiceError;
use crate::request::RequestContext;

/// A freshly created link and its public URL.
#[derive(Debug, Clone)]
pub struct ShortenOutcome {
    /// The stored link.
    pub link: ShortLink,
    /// `base_url/code`.
    pub short_url: String,
}

/// A link together with its visit statistics.
#[derive(Debug, Clone)]
pub struct LinkStats {
    /// The link.
    pub link: ShortLink,
    /// Its visits.
    pub stats: VisitStats,
}

/// Orchestrates code allocation, lookups and visit logging.
#[derive(Clone)]
pub struct LinkService {
    store: Arc<dyn Store>,
}

impl LinkService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Create a short link for an already validated URL.
    ///
    /// Losing the race for a code to a concurrent request surfaces as
    /// `ServiceError::Conflict`, same as a failed pre-check.
    ///
    /// # Errors
    ///
    /// Whatever the allocator or the store reports.
    pub async fn shorten(
        &self,
        long_url: &str,
        custom_code: Option<&str>,
        base_url: &str,
    ) -> Result<ShortenOutcome, ServiceError> {
        let code = CodeAllocator::new(self.store()).allocate(custom_code).await?;
        let link = ShortLink::new(code, long_url);

        self.store.insert_short_link(&link).await?;

        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), link.code);
        tracing::info!(code = %link.code, long_url = %link.long_url, "Short link created");

        Ok(ShortenOutcome { link, short_url })
    }

    /// Look up a link by its raw path segment.
    ///
    /// # Errors
    ///
    /// `ServiceError::NotFound` if no link has this code, including codes
    /// that could never have been issued.
    pub async fn lookup(&self, code: &str) -> Result<ShortLink, ServiceError> {
        let Ok(parsed) = code.parse::<ShortCode>() else {
            return Err(ServiceError::NotFound(code.to_string()));
        };

        self.store
            .get_short_link(&parsed)
            .await?
            .ok_or_else(|| ServiceError::NotFound(code.to_string()))
    }

    /// Resolve a code to its destination and record the visit.
    ///
    /// Visit logging is best-effort: if the store fails to record the visit
    /// the failure is logged and the destination is still returned.
    ///
    /// # Errors
    ///
    /// `ServiceError::NotFound` if the code is unknown, or a storage error
    /// from the lookup.
    pub async fn resolve_and_log(
        &self,
        code: &str,
        ctx: &RequestContext,
    ) -> Result<String, ServiceError> {
        let link = self.lookup(code).await?;

        let ip = ctx.client_ip();
        let visit = Visit::new(link.code.clone(), ctx.user_agent.clone(), ip.clone());

        match self.store.insert_visit(&visit).await {
            Ok(()) => {
                tracing::info!(code = %link.code, ip = ?ip, "Visit recorded");
            }
            Err(e) => {
                tracing::warn!(code = %link.code, error = %e, "Failed to record visit");
            }
        }

        Ok(link.long_url)
    }

    /// A link with its total clicks, last access and the `limit` newest visits.
    ///
    /// # Errors
    ///
    /// `ServiceError::NotFound` if the code is unknown, or a storage error.
    pub async fn get_stats(&self, code: &str, limit: u32) -> Result<LinkStats, ServiceError> {
        let link = self.lookup(code).await?;
        let stats = self.store.visit_stats(&link.code, limit).await?;
        Ok(LinkStats { link, stats })
    }
}
