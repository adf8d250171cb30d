//! Integration test support for the Bistro backend.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p bistro-cli -- migrate
//!
//! # Start the server
//! cargo run -p bistro-api
//!
//! # Run the (ignored-by-default) suite
//! cargo test -p bistro-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `BISTRO_BASE_URL` - server under test (default: `http://localhost:5000`)
//! - `BISTRO_DATABASE_URL` - direct database access for fixtures (role
//!   promotion, cleanup)

use reqwest::Client;
use serde_json::{Value, json};

/// Context for driving a running server.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("BISTRO_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_owned());
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// Absolute URL for a path under the server under test.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issue a session token for the given identity via `POST /jwt`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response has no token.
    pub async fn issue_token(&self, email: &str, role: Option<&str>) -> String {
        let mut identity = json!({ "email": email });
        if let Some(role) = role {
            identity["role"] = json!(role);
        }

        let response = self
            .client
            .post(self.url("/jwt"))
            .json(&identity)
            .send()
            .await
            .expect("Failed to request token");
        assert!(response.status().is_success(), "token issuance failed");

        let body: Value = response.json().await.expect("Failed to parse token body");
        body["token"]
            .as_str()
            .expect("response missing token")
            .to_owned()
    }

    /// `Authorization` header value for a token.
    #[must_use]
    pub fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Direct database handle for fixtures the API deliberately does not expose
/// (role promotion, test cleanup).
///
/// # Panics
///
/// Panics if `BISTRO_DATABASE_URL`/`DATABASE_URL` is unset or unreachable.
pub async fn test_pool() -> sqlx::PgPool {
    let url = std::env::var("BISTRO_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("BISTRO_DATABASE_URL must be set for integration tests");
    sqlx::PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database")
}
