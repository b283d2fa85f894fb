//! Landing page, dashboard and asset serving.

use axum::http::StatusCode;
use integration_tests::setup::{TestContext, DASHBOARD_HTML, INDEX_HTML};

#[tokio::test]
async fn test_root_serves_landing_page() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), INDEX_HTML);
}

#[tokio::test]
async fn test_dashboard_page() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/dashboard").await;
    response.assert_status_ok();
    assert_eq!(response.text(), DASHBOARD_HTML);
}

#[tokio::test]
async fn test_assets_served_from_static_dir() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/script.js").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "// beacon");

    server
        .get("/missing.css")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// CORS is open, matching the beacon being posted from any origin
#[tokio::test]
async fn test_cors_allows_any_origin() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/api/stats")
        .add_header("Origin", "https://partner.example.com")
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.header("access-control-allow-origin"),
        "*"
    );
}
