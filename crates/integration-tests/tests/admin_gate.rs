//! Integration tests for the role gates on admin endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p cedar-market-server)
//!
//! Run with: cargo test -p cedar-market-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::json;

use cedar_market_integration_tests::{base_url, client, unique_email};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn anonymous_admin_request_is_401() {
    let resp = reqwest::Client::new()
        .get(format!("{}/admin/users", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn customer_on_admin_endpoint_is_403() {
    let client = client();
    let base = base_url();

    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({
            "name": "Plain Customer",
            "email": unique_email("gate"),
            "password": "a-long-enough-password",
        }))
        .send()
        .await
        .expect("register failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Logged in, but not an admin
    let resp = client
        .get(format!("{base}/admin/users"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .post(format!("{base}/admin/qr-codes"))
        .json(&json!({ "label": "menu", "data": "https://example.com" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn public_endpoints_need_no_credential() {
    let base = base_url();
    let anon = reqwest::Client::new();

    for path in ["/products", "/team", "/health"] {
        let resp = anon
            .get(format!("{base}{path}"))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::OK, "{path} should be public");
    }
}
