mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use link_inspector::api::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(ctx.state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["rate_limiter"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(ctx.state);

    let server = TestServer::new(app).unwrap();

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("storage").is_some());
    assert!(json["checks"].get("rate_limiter").is_some());
}
