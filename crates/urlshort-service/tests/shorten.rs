//! Link creation integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};
use urlshort_store::Store;

// ============================================================================
// Random codes
// ============================================================================

#[tokio::test]
async fn shorten_generates_six_char_code() {
    let harness = TestHarness::new().await;

    let body = harness.shorten("https://example.com/some/page?q=1", None).await;

    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
    assert_eq!(body["long_url"], "https://example.com/some/page?q=1");
    assert!(body["short_url"].as_str().unwrap().ends_with(&format!("/{code}")));
}

#[tokio::test]
async fn shortening_same_url_twice_gives_distinct_codes() {
    let harness = TestHarness::new().await;

    let first = harness.shorten("https://example.com/", None).await;
    let second = harness.shorten("https://example.com/", None).await;

    assert_ne!(first["code"], second["code"]);
}

#[tokio::test]
async fn blank_custom_code_is_treated_as_absent() {
    let harness = TestHarness::new().await;

    let body = harness.shorten("https://example.com/", Some("   ")).await;

    assert_eq!(body["code"].as_str().unwrap().len(), 6);
}

// ============================================================================
// Custom codes
// ============================================================================

#[tokio::test]
async fn custom_code_is_used_verbatim() {
    let harness = TestHarness::new().await;

    let body = harness
        .shorten("https://example.com/", Some(" Spring-Sale "))
        .await;

    assert_eq!(body["code"], "Spring-Sale");
}

#[tokio::test]
async fn duplicate_custom_code_conflicts() {
    let harness = TestHarness::new().await;
    harness.shorten("https://a.example/", Some("promo")).await;

    let response = harness
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://b.example/", "custom_code": "promo" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "conflict");
    assert_eq!(body["error"]["message"], "custom_code already exists");
}

#[tokio::test]
async fn invalid_custom_code_is_rejected_without_writing() {
    let harness = TestHarness::new().await;

    for bad in ["has space", "slash/ed", "dot.ted", "emoji🙂"] {
        let response = harness
            .server
            .post("/api/shorten")
            .json(&json!({ "url": "https://example.com/", "custom_code": bad }))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(
            body["error"]["message"],
            "custom_code must be alphanumeric or hyphen"
        );
    }

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(harness.store.pool())
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

// ============================================================================
// URL validation
// ============================================================================

#[tokio::test]
async fn invalid_urls_are_unprocessable() {
    let harness = TestHarness::new().await;

    for bad in ["", "not a url", "ftp://example.com/file", "/relative/path", "https://"] {
        let response = harness
            .server
            .post("/api/shorten")
            .json(&json!({ "url": bad }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "unprocessable_entity", "{bad:?}");
    }
}

#[tokio::test]
async fn missing_url_field_is_unprocessable() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/shorten")
        .json(&json!({ "custom_code": "abc" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!harness.store.code_exists(&"abc".parse().unwrap()).await.unwrap());
}

// ============================================================================
// Short URL host
// ============================================================================

#[tokio::test]
async fn forwarded_host_and_proto_build_short_url() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/shorten")
        .add_header("host", "internal:8000")
        .add_header("x-forwarded-host", "links.example")
        .add_header("x-forwarded-proto", "https")
        .json(&json!({ "url": "https://example.com/", "custom_code": "fwd" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["short_url"], "https://links.example/fwd");
}

#[tokio::test]
async fn host_header_builds_short_url() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/api/shorten")
        .add_header("host", "localhost:8000")
        .json(&json!({ "url": "https://example.com/", "custom_code": "local" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let short_url = body["short_url"].as_str().unwrap();
    assert!(short_url.ends_with("://localhost:8000/local"), "{short_url}");
}
