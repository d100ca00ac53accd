//! QR endpoint integration tests.

mod common;

use common::TestHarness;

#[tokio::test]
async fn qr_is_png() {
    let harness = TestHarness::new().await;
    harness.shorten("https://example.com/", Some("scan")).await;

    let response = harness.server.get("/api/scan/qr").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert!(response.as_bytes().starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[tokio::test]
async fn qr_does_not_count_as_visit() {
    let harness = TestHarness::new().await;
    harness.shorten("https://example.com/", Some("scan")).await;

    harness.server.get("/api/scan/qr").await.assert_status_ok();

    let body: serde_json::Value = harness.server.get("/api/scan/stats").await.json();
    assert_eq!(body["total_clicks"], 0);
}

#[tokio::test]
async fn qr_for_unknown_code_is_not_found() {
    let harness = TestHarness::new().await;

    for path in ["/api/ghost/qr", "/api/%FF/qr"] {
        let response = harness.server.get(path).await;

        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"]["code"], "not_found", "{path}");
    }
}
