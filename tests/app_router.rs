mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use link_inspector::routes::router;
use serde_json::json;

fn create_server(ctx: &common::TestContext) -> TestServer {
    let app = router(
        ctx.state.clone(),
        concat!(env!("CARGO_MANIFEST_DIR"), "/public"),
    );

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_index_page_is_served() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("<html"));
}

#[tokio::test]
async fn test_only_shorten_is_rate_limited() {
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

    server
        .post("/check-malicious")
        .json(&json!({ "urlToCheck": "https://example.com" }))
        .await
        .assert_status_ok();
    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    server.get("/zzzzzz").await.assert_status_not_found();
}
