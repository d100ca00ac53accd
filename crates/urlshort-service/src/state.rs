//! Application state.

use std::sync::Arc;

use urlshort_store::Store;

use crate::config::ServiceConfig;
use crate::links::LinkService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Link operations over the configured store.
    pub links: LinkService,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        Self {
            links: LinkService::new(store),
            config,
        }
    }
}
