//! Redirect integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::Value;

#[tokio::test]
async fn redirect_is_temporary_with_location() {
    let harness = TestHarness::new().await;
    let body = harness
        .shorten("https://example.com/docs?page=2#intro", None)
        .await;
    let code = body["code"].as_str().unwrap();

    let response = harness.server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "https://example.com/docs?page=2#intro"
    );
}

#[tokio::test]
async fn bare_host_gains_trailing_slash() {
    let harness = TestHarness::new().await;
    harness.shorten("https://example.com", Some("home")).await;

    let response = harness.server.get("/home").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/");
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let harness = TestHarness::new().await;

    for path in ["/nope42", "/favicon.ico", "/has%20space", "/%FF"] {
        let response = harness.server.get(path).await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "not_found", "{path}");
    }
}

#[tokio::test]
async fn codes_are_case_sensitive() {
    let harness = TestHarness::new().await;
    harness.shorten("https://example.com/", Some("CaSe")).await;

    harness.server.get("/case").await.assert_status_not_found();
    harness
        .server
        .get("/CaSe")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn visit_records_forwarded_client() {
    let harness = TestHarness::new().await;
    harness.shorten("https://example.com/", Some("who")).await;

    harness
        .server
        .get("/who")
        .add_header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
        .add_header("user-agent", "Mozilla/5.0 (test)")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    let stats: Value = harness.server.get("/api/who/stats").await.json();
    let visit = &stats["recent"][0];
    assert_eq!(visit["ip"], "203.0.113.9");
    assert_eq!(visit["user_agent"], "Mozilla/5.0 (test)");
    assert!(visit["city"].is_null());
}
