//! Core types and utilities for urlshort.
//!
//! This crate provides the foundational types used throughout the service:
//!
//! - **Codes**: `ShortCode`, custom-code validation and random code generation
//! - **Links**: `ShortLink`, long URL normalization
//! - **Visits**: `Visit`, `VisitStats`
//!
//! # Timestamps
//!
//! All timestamps are UTC. When persisted they are written as RFC 3339 text
//! with microsecond precision and a `+00:00` offset, so lexical ordering of the
//! stored strings matches chronological ordering.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod code;
pub mod error;
pub mod link;
pub mod visit;

pub use code::{
    generate_code, validate_custom_code, ShortCode, CODE_ALPHABET, GENERATED_CODE_LEN,
    MAX_ALLOCATION_ATTEMPTS,
};
pub use error::{CoreError, Result};
pub use link::{normalize_long_url, ShortLink, MAX_URL_LEN};
pub use visit::{format_timestamp, parse_timestamp, Visit, VisitStats, DEFAULT_RECENT_LIMIT};
