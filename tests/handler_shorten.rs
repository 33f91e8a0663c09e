mod common;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::{Json, Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;
use link_inspector::api::dto::shorten::ShortenRequest;
use link_inspector::api::handlers::{redirect_handler, shorten_handler};
use link_inspector::api::routes::limited_routes;

fn create_server(ctx: &common::TestContext) -> TestServer {
    let app = Router::new()
        .merge(limited_routes(ctx.state.clone()))
        .route("/{id}", get(redirect_handler))
        .with_state(ctx.state.clone());

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_success() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let short_url = json["shortUrl"].as_str().unwrap();
    assert!(short_url.starts_with("http://sho.rt/"));
    assert!(short_url.len() > "http://sho.rt/".len());
}

#[tokio::test]
async fn test_shorten_then_redirect_upgrades_http() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "http://example.com/a" }))
        .await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let short_url = json["shortUrl"].as_str().unwrap();
    let short_id = short_url.rsplit('/').next().unwrap();

    let response = server.get(&format!("/{short_id}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/a");
}

#[tokio::test]
async fn test_same_url_gets_distinct_ids() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let mut seen = HashSet::new();
    for _ in 0..3 {
        let response = server
            .post("/shorten")
            .json(&json!({ "url": "https://example.com/same" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert!(seen.insert(json["shortUrl"].as_str().unwrap().to_string()));
    }
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    for url in ["ftp://example.com", "example.com", "https://", "https://a b.com"] {
        let response = server.post("/shorten").json(&json!({ "url": url })).await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"], "Invalid URL format.");
    }
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server.post("/shorten").json(&json!({})).await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Invalid URL format.");
}

#[tokio::test]
async fn test_shorten_rate_limited_after_capacity() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    for _ in 0..5 {
        server
            .post("/shorten")
            .json(&json!({ "url": "https://example.com" }))
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Too Many Requests: Rate limit exceeded.");
}

#[tokio::test]
async fn test_rejected_requests_consume_tokens() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    for _ in 0..5 {
        server
            .post("/shorten")
            .json(&json!({ "url": "not a url" }))
            .await
            .assert_status_bad_request();
    }

    server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_rate_limit_refills_over_time() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    for _ in 0..5 {
        server
            .post("/shorten")
            .json(&json!({ "url": "https://example.com" }))
            .await
            .assert_status_ok();
    }
    server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    ctx.clock.advance(Duration::from_secs(2));

    for _ in 0..2 {
        server
            .post("/shorten")
            .json(&json!({ "url": "https://example.com" }))
            .await
            .assert_status_ok();
    }
    server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_shorten_uses_host_header_without_base_url() {
    let ctx = common::create_test_state_with(common::ScriptedProbe::new(), None);
    let server = create_server(&ctx);

    let response = server
        .post("/shorten")
        .add_header("Host", "localhost:3000")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert!(
        json["shortUrl"]
            .as_str()
            .unwrap()
            .starts_with("http://localhost:3000/")
    );
}

#[tokio::test]
async fn test_shorten_honors_forwarded_proto() {
    let ctx = common::create_test_state_with(common::ScriptedProbe::new(), None);
    let server = create_server(&ctx);

    let response = server
        .post("/shorten")
        .add_header("Host", "sho.rt")
        .add_header("X-Forwarded-Proto", "https")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert!(
        json["shortUrl"]
            .as_str()
            .unwrap()
            .starts_with("https://sho.rt/")
    );
}

#[tokio::test]
async fn test_unknown_origin_stores_nothing() {
    let ctx = common::create_test_state_with(common::ScriptedProbe::new(), None);

    let result = shorten_handler(
        State(ctx.state.clone()),
        HeaderMap::new(),
        Uri::from_static("/shorten"),
        Json(ShortenRequest {
            url: "https://example.com".to_string(),
        }),
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Missing Host header");
    assert!(ctx.repository.is_empty().await);
}

#[tokio::test]
async fn test_origin_from_uri_authority_without_host() {
    let ctx = common::create_test_state_with(common::ScriptedProbe::new(), None);

    let result = shorten_handler(
        State(ctx.state.clone()),
        HeaderMap::new(),
        Uri::from_static("https://sho.rt/shorten"),
        Json(ShortenRequest {
            url: "https://example.com".to_string(),
        }),
    )
    .await;

    let Json(response) = result.ok().unwrap();
    assert!(response.short_url.starts_with("https://sho.rt/"));
    assert_eq!(ctx.repository.len().await, 1);
}
