//! Integration tests for Cedar Market.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p cedar-market-cli -- migrate
//!
//! # Start the server
//! cargo run -p cedar-market-server
//!
//! # Run integration tests
//! cargo test -p cedar-market-integration-tests -- --ignored
//! ```
//!
//! Tests live in `tests/` and hit a running server over HTTP with a
//! cookie-aware client, so they exercise the real auth cookie flow.

use reqwest::Client;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CEDAR_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create a cookie-aware HTTP client. Each client is an independent
/// "browser": registering or logging in stores the auth cookie for
/// subsequent requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate an email unlikely to collide with earlier test runs.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos());
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    format!("{prefix}-{millis}-{nanos}@test.example")
}
