//! urlshort HTTP API service.
//!
//! This crate provides the HTTP surface of the URL shortener:
//!
//! - Short link creation with random or custom codes
//! - Redirects that record each visit
//! - Per-link visit statistics
//! - QR codes for short URLs
//!
//! Storage is injected as an `Arc<dyn Store>`; the binary wires in
//! `SqliteStore`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers must be async for the router

pub mod allocator;
pub mod config;
pub mod error;
pub mod handlers;
pub mod links;
pub mod logging;
pub mod qr;
pub mod request;
pub mod routes;
pub mod state;

pub use allocator::CodeAllocator;
pub use config::ServiceConfig;
pub use error::{ApiError, ServiceError};
pub use links::{LinkService, LinkStats, ShortenOutcome};
pub use logging::init_logging;
pub use request::RequestContext;
pub use routes::create_router;
pub use state::AppState;
