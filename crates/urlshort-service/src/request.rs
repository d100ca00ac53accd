//! Request metadata extraction.
//!
//! `RequestContext` captures the parts of a request the link service cares
//! about: who is visiting and under which host the service was reached.
//! Forwarded headers set by a reverse proxy take precedence over what the
//! connection itself reports.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::{HOST, USER_AGENT};
use axum::http::request::Parts;
use axum::http::HeaderMap;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Client and host information for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Raw `User-Agent` header.
    pub user_agent: Option<String>,

    /// Raw `X-Forwarded-For` header.
    pub forwarded_for: Option<String>,

    /// TCP peer address, when the server was started with connect info.
    pub peer_addr: Option<SocketAddr>,

    /// `X-Forwarded-Host`, falling back to `Host`, falling back to the URI authority.
    pub host: Option<String>,

    /// `X-Forwarded-Proto`, falling back to the URI scheme.
    pub scheme: Option<String>,
}

impl RequestContext {
    /// Build a context from request parts.
    #[must_use]
    pub fn from_parts(parts: &Parts) -> Self {
        let headers = &parts.headers;

        let host = header(headers, X_FORWARDED_HOST)
            .or_else(|| header(headers, HOST.as_str()))
            .or_else(|| parts.uri.authority().map(ToString::to_string));

        let scheme = header(headers, X_FORWARDED_PROTO)
            .or_else(|| parts.uri.scheme_str().map(str::to_string));

        Self {
            user_agent: header(headers, USER_AGENT.as_str()),
            forwarded_for: header(headers, X_FORWARDED_FOR),
            peer_addr: parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr),
            host,
            scheme,
        }
    }

    /// The client IP: first `X-Forwarded-For` entry, else the peer address.
    #[must_use]
    pub fn client_ip(&self) -> Option<String> {
        self.forwarded_for
            .as_deref()
            .and_then(|h| h.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string)
            .or_else(|| self.peer_addr.map(|addr| addr.ip().to_string()))
    }

    /// The base URL this request reached the service under, without a
    /// trailing slash. `fallback` is used when the request names no host.
    #[must_use]
    pub fn base_url(&self, fallback: &str) -> String {
        match &self.host {
            Some(host) => {
                let scheme = self.scheme.as_deref().unwrap_or("http");
                format!("{scheme}://{host}")
            }
            None => fallback.trim_end_matches('/').to_string(),
        }
    }
}

/// Read a header as a trimmed, non-empty string.
fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
