//! End-to-end tests for the tracking beacon.

use axum::http::StatusCode;
use integration_tests::{
    fixtures,
    setup::{ContextOptions, TestContext},
};
use serde_json::json;
use store::RecordStore;
use tracker_core::{limits::MAX_BODY_BYTES, RecordKind};

/// Beacon with only page_url set: id assigned, count +1, other fields empty
#[tokio::test]
async fn test_pageview_with_only_page_url() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/pageview")
        .json(&json!({ "page_url": "https://example.com/" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({ "success": true, "viewId": 1 }));

    let stats: serde_json::Value = server.get("/api/stats").await.json();
    assert_eq!(stats["totalPageViews"], 1);

    let view = &stats["recentPageViews"][0];
    assert_eq!(view["page_url"], "https://example.com/");
    assert!(view["referrer"].is_null());
    assert!(view["utm_source"].is_null());
    assert!(view["utm_medium"].is_null());
    assert!(view["utm_campaign"].is_null());
}

/// Every beacon shape succeeds and adds exactly one row
#[tokio::test]
async fn test_every_beacon_shape_counts_once() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let payloads = [
        json!({}),
        fixtures::pageview_payload("https://example.com/"),
        fixtures::campaign_pageview_payload("newsletter", "email", "launch"),
        json!({ "utm_source": null, "referrer": "https://t.co/" }),
    ];

    for (i, payload) in payloads.iter().enumerate() {
        let response = server.post("/api/pageview").json(payload).await;
        response.assert_status_ok();
        let stats: serde_json::Value = server.get("/api/stats").await.json();
        assert_eq!(stats["totalPageViews"], i as u64 + 1);
    }
}

/// Empty body is a valid beacon
#[tokio::test]
async fn test_pageview_with_empty_body() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.post("/api/pageview").bytes("".into()).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["viewId"], 1);
}

/// Behind a trusted proxy the forwarded client address is stored
#[tokio::test]
async fn test_trusted_proxy_ip_and_user_agent_stored() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/api/pageview")
        .add_header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
        .add_header("User-Agent", "Mozilla/5.0 (Test)")
        .json(&fixtures::pageview_payload("https://example.com/"))
        .await
        .assert_status_ok();

    let views = ctx.store.inner().recent_page_views(1).await.unwrap();
    assert_eq!(views[0].ip_address.as_deref(), Some("203.0.113.9"));
    assert_eq!(views[0].user_agent.as_deref(), Some("Mozilla/5.0 (Test)"));
    assert_eq!(views[0].utm_source.as_deref(), Some(""));
}

/// Without proxy trust the forwarded header is ignored and the peer
/// address is stored instead
#[tokio::test]
async fn test_untrusted_proxy_header_ignored() {
    let ctx = TestContext::with_options(ContextOptions {
        trust_proxy: false,
        ..Default::default()
    });
    let server = ctx.http_server();

    server
        .post("/api/pageview")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .json(&json!({}))
        .await
        .assert_status_ok();

    let views = ctx.store.inner().recent_page_views(1).await.unwrap();
    assert_eq!(views[0].ip_address.as_deref(), Some("127.0.0.1"));
}

/// Trusted proxy without forwarding headers falls back to the peer address
#[tokio::test]
async fn test_trusted_proxy_without_headers_uses_peer() {
    let ctx = TestContext::new();
    let server = ctx.http_server();

    server
        .post("/api/pageview")
        .json(&json!({}))
        .await
        .assert_status_ok();

    let views = ctx.store.inner().recent_page_views(1).await.unwrap();
    assert_eq!(views[0].ip_address.as_deref(), Some("127.0.0.1"));
}

/// Attribution fields over the length limit are rejected before storing
#[tokio::test]
async fn test_oversized_field_rejected() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/pageview")
        .json(&json!({ "page_url": "x".repeat(3000) }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Field too long: page_url");
}

/// The field limit is measured in UTF-8 bytes, not characters
#[tokio::test]
async fn test_multibyte_field_limit_in_bytes() {
    let ctx = TestContext::new();
    let server = ctx.server();

    // 2048 characters, 4096 bytes
    let response = server
        .post("/api/pageview")
        .json(&json!({ "page_url": "é".repeat(2048) }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Field too long: page_url");

    // 1024 characters, exactly 2048 bytes
    server
        .post("/api/pageview")
        .json(&json!({ "page_url": "é".repeat(1024) }))
        .await
        .assert_status_ok();

    assert_eq!(
        ctx.store.inner().count(RecordKind::PageView).await.unwrap(),
        1
    );
}

/// Bodies over the size limit get 413 with the usual error shape
#[tokio::test]
async fn test_oversized_body_is_413() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let filler = "x".repeat(MAX_BODY_BYTES);
    let response = server
        .post("/api/pageview")
        .json(&json!({ "page_url": filler }))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body:"));
    assert_eq!(
        ctx.store.inner().count(RecordKind::PageView).await.unwrap(),
        0
    );
}

/// Bodies that are neither JSON nor a form are not parsed
#[tokio::test]
async fn test_non_json_content_type_records_empty_view() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .post("/api/pageview")
        .content_type("text/plain")
        .bytes(r#"{"page_url": "https://example.com/"}"#.into())
        .await
        .assert_status_ok();

    let views = ctx.store.inner().recent_page_views(1).await.unwrap();
    assert_eq!(views[0].page_url, None);
}
