//! Integration tests for Storekeeper.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database and start the panel
//! cargo run -p storekeeper-cli -- migrate
//! cargo run -p storekeeper-panel
//!
//! # Run integration tests against it
//! cargo test -p storekeeper-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `panel_auth` - Registration, login, logout and profile tests
//! - `panel_products` - Product page and delete API tests
//!
//! Product tests call through to the live external product API, so their
//! assertions tolerate upstream outages.

use reqwest::Client;
use uuid::Uuid;

/// Base URL for the panel (configurable via environment).
#[must_use]
pub fn panel_base_url() -> String {
    std::env::var("PANEL_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// A username that no previous test run can have taken.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Register a fresh user and return their auth token and username.
///
/// # Panics
///
/// Panics if the panel is unreachable or registration fails.
pub async fn register_user(client: &Client) -> (String, String) {
    let base_url = panel_base_url();
    let username = unique_username("it");

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&serde_json::json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "integration test pass",
        }))
        .send()
        .await
        .expect("Failed to register test user");

    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse response");
    let token = body["token"]
        .as_str()
        .expect("Registration response carried no token")
        .to_string();

    (token, username)
}
