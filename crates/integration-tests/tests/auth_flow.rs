//! Integration tests for registration, login, and the auth cookie.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p cedar-market-server)
//!
//! Run with: cargo test -p cedar-market-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use cedar_market_integration_tests::{base_url, client, unique_email};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn register_login_me_round_trip() {
    let client = client();
    let base = base_url();
    let email = unique_email("auth");

    // Register; the response sets the auth cookie
    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({
            "name": "Test Customer",
            "email": email,
            "password": "a-long-enough-password",
        }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // The cookie from registration authenticates /auth/me
    let resp = client
        .get(format!("{base}/auth/me"))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("me response not JSON");
    assert_eq!(body["user"]["email"], email.to_lowercase());

    // Logout clears the cookie; /auth/me becomes 401
    let resp = client
        .post(format!("{base}/auth/logout"))
        .send()
        .await
        .expect("logout request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/auth/me"))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Login restores access
    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": email, "password": "a-long-enough-password" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/auth/me"))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn duplicate_email_is_rejected_with_400() {
    let client = client();
    let base = base_url();
    let email = unique_email("dupe");
    let payload = json!({
        "name": "First",
        "email": email,
        "password": "a-long-enough-password",
    });

    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&payload)
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Same email with different case still collides
    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({
            "name": "Second",
            "email": email.to_uppercase(),
            "password": "a-long-enough-password",
        }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error response not JSON");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn wrong_password_is_401() {
    let client = client();
    let base = base_url();
    let email = unique_email("wrongpw");

    client
        .post(format!("{base}/auth/register"))
        .json(&json!({
            "name": "Test",
            "email": email,
            "password": "a-long-enough-password",
        }))
        .send()
        .await
        .expect("register request failed");

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn tampered_cookie_is_anonymous() {
    let base = base_url();

    // A hand-built client sends a forged cookie without a cookie store
    let forged = reqwest::Client::new();
    let resp = forged
        .get(format!("{base}/auth/me"))
        .header("Cookie", "auth_token=forged.token.value")
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
