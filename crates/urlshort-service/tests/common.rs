//! Common test utilities for urlshort integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use urlshort_service::{create_router, AppState, ServiceConfig};
use urlshort_store::{SqliteStore, Store};

/// Base URL used when a request carries no host information.
pub const PUBLIC_BASE_URL: &str = "https://sho.rt";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct handle on the store behind the server.
    pub store: Arc<SqliteStore>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("urlshort.db");

        let store = Arc::new(
            SqliteStore::open(&db_path)
                .await
                .expect("Failed to open store"),
        );
        store.create_schema().await.expect("Failed to create schema");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            db_path: db_path.to_string_lossy().to_string(),
            log_level: "info".into(),
            log_dir: None,
            log_format: "text".into(),
            public_base_url: PUBLIC_BASE_URL.into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(store.clone(), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Shorten `url`, optionally under `custom_code`, and return the response body.
    pub async fn shorten(&self, url: &str, custom_code: Option<&str>) -> Value {
        let mut body = json!({ "url": url });
        if let Some(code) = custom_code {
            body["custom_code"] = json!(code);
        }

        let response = self.server.post("/api/shorten").json(&body).await;
        response.assert_status_ok();
        response.json()
    }

    /// Follow the short link `code` once from `ip`.
    pub async fn visit(&self, code: &str, ip: &str) {
        self.server
            .get(&format!("/{code}"))
            .add_header("x-forwarded-for", ip)
            .add_header("user-agent", "integration-test")
            .await
            .assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
    }
}
