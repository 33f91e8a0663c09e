mod common;

use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use link_inspector::api::routes::inspection_routes;
use link_inspector::domain::gateways::ProbeError;
use serde_json::json;

fn create_server(ctx: &common::TestContext) -> TestServer {
    let app = inspection_routes().with_state(ctx.state.clone());

    TestServer::new(app).unwrap()
}

fn chain_probe() -> common::ScriptedProbe {
    common::ScriptedProbe::new()
        .redirect("https://a.example/", 301, "https://b.example/")
        .redirect("https://b.example/", 302, "/landing")
}

#[tokio::test]
async fn test_check_redirects_follows_chain() {
    let ctx = common::create_test_state(chain_probe());
    let server = create_server(&ctx);

    let response = server
        .post("/check-redirects")
        .json(&json!({ "urlToCheck": "https://a.example/" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "Redirect chain followed successfully");
    assert_eq!(
        json["redirectChain"],
        json!([
            { "from": "https://a.example/", "to": "https://b.example/" },
            { "from": "https://b.example/", "to": "https://b.example/landing" },
            { "from": "https://b.example/landing", "to": "https://b.example/landing" }
        ])
    );
}

#[tokio::test]
async fn test_check_redirects_without_redirect() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server
        .post("/check-redirects")
        .json(&json!({ "urlToCheck": "https://plain.example/" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["redirectChain"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_check_redirects_missing_url() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    for body in [json!({}), json!({ "urlToCheck": "" })] {
        let response = server.post("/check-redirects").json(&body).await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"], "URL is required");
    }
}

#[tokio::test]
async fn test_check_redirects_invalid_start_url() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server
        .post("/check-redirects")
        .json(&json!({ "urlToCheck": "not a url" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Invalid URL format.");
}

#[tokio::test]
async fn test_check_redirects_cycle_reports_failing_url() {
    let probe = common::ScriptedProbe::new()
        .redirect("https://a.example/", 302, "https://b.example/")
        .redirect("https://b.example/", 302, "https://a.example/");
    let ctx = common::create_test_state(probe);
    let server = create_server(&ctx);

    let response = server
        .post("/check-redirects")
        .json(&json!({ "urlToCheck": "https://a.example/" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["url"], "https://a.example/");
    assert!(json["error"].as_str().unwrap().contains("cycle"));
    assert!(json.get("redirectChain").is_none());
}

#[tokio::test]
async fn test_check_redirects_too_many_hops() {
    let mut probe = common::ScriptedProbe::new();
    for i in 0..10 {
        probe = probe.redirect(
            &format!("https://hop{i}.example/"),
            302,
            &format!("https://hop{}.example/", i + 1),
        );
    }
    let ctx = common::create_test_state(probe);
    let server = create_server(&ctx);

    let response = server
        .post("/check-redirects")
        .json(&json!({ "urlToCheck": "https://hop0.example/" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["url"], "https://hop5.example/");
}

#[tokio::test]
async fn test_check_redirects_transport_failure() {
    let probe = common::ScriptedProbe::new()
        .redirect("https://a.example/", 301, "https://down.example/")
        .fail(
            "https://down.example/",
            ProbeError::Transport("connection refused".to_string()),
        );
    let ctx = common::create_test_state(probe);
    let server = create_server(&ctx);

    let response = server
        .post("/check-redirects")
        .json(&json!({ "urlToCheck": "https://a.example/" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["url"], "https://down.example/");
}

#[tokio::test]
async fn test_check_malicious_known_domain() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server
        .post("/check-malicious")
        .json(&json!({ "urlToCheck": "https://PHISHING.com/login" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "The URL is potentially malicious.");
    assert_eq!(json["verdict"], "SUSPICIOUS");
    assert_eq!(json["matchedRule"], "known_bad_domain");
}

#[tokio::test]
async fn test_check_malicious_plain_http_is_suspicious() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server
        .post("/check-malicious")
        .json(&json!({ "urlToCheck": "http://example.com" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["verdict"], "SUSPICIOUS");
    assert_eq!(json["matchedRule"], "insecure_scheme");
}

#[tokio::test]
async fn test_check_malicious_safe() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server
        .post("/check-malicious")
        .json(&json!({ "urlToCheck": "https://example.com" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "The URL appears to be safe.");
    assert_eq!(json["verdict"], "SAFE");
    assert!(json.get("matchedRule").is_none());
}

#[tokio::test]
async fn test_check_malicious_missing_url() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server.post("/check-malicious").json(&json!({})).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_url_info_reports_final_destination() {
    let ctx = common::create_test_state(chain_probe());
    let server = create_server(&ctx);

    let response = server
        .post("/get-url-info")
        .json(&json!({ "url": "https://a.example/" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["url"], "https://a.example/");
    assert_eq!(json["effectiveUrl"], "https://b.example/landing");
    assert_eq!(json["redirections"].as_array().unwrap().len(), 2);
    assert_eq!(json["safeBrowsing"], "SAFE");
    assert!(json["title"].is_null());
    assert!(json["description"].is_null());
}

#[tokio::test]
async fn test_url_info_flags_suspicious_destination() {
    let probe =
        common::ScriptedProbe::new().redirect("https://a.example/", 302, "https://spam.com/win");
    let ctx = common::create_test_state(probe);
    let server = create_server(&ctx);

    let response = server
        .post("/get-url-info")
        .json(&json!({ "url": "https://a.example/" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["safeBrowsing"], "SUSPICIOUS");
}

#[tokio::test]
async fn test_qr_matrix_shape() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server
        .post("/qr")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["size"], 29);

    let rows = json["matrix"].as_array().unwrap();
    assert_eq!(rows.len(), 29);
    assert!(rows.iter().all(|row| row.as_array().unwrap().len() == 29));

    // Top-left finder: dark border, light ring, dark core.
    assert_eq!(rows[0][0], 1);
    assert_eq!(rows[1][1], 0);
    assert_eq!(rows[3][3], 1);
}

#[tokio::test]
async fn test_qr_is_deterministic() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let first = server
        .post("/qr")
        .json(&json!({ "url": "https://example.com/x" }))
        .await
        .json::<serde_json::Value>();
    let second = server
        .post("/qr")
        .json(&json!({ "url": "https://example.com/x" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_qr_missing_url() {
    let ctx = common::create_test_state(common::ScriptedProbe::new());
    let server = create_server(&ctx);

    let response = server.post("/qr").json(&json!({ "url": "" })).await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "URL is required");
}
