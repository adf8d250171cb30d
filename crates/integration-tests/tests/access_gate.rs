//! Integration tests for the access gate.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (cargo run -p bistro-cli -- migrate)
//! - The API server running (cargo run -p bistro-api)
//!
//! Run with: cargo test -p bistro-integration-tests -- --ignored

use bistro_integration_tests::{TestContext, test_pool};
use reqwest::{StatusCode, header::AUTHORIZATION};
use serde_json::{Value, json};
use uuid::Uuid;

fn unique_email() -> String {
    format!("gate-{}@test.bistro", Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn missing_credential_is_rejected_before_handler() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(ctx.url("/users"))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn garbage_token_is_rejected() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(ctx.url("/users"))
        .header(AUTHORIZATION, "Bearer not-a-real-token")
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn role_gate_reads_fresh_store_value() {
    let ctx = TestContext::new();
    let pool = test_pool().await;
    let email = unique_email();

    // Register and get a token for a plain user.
    let resp = ctx
        .client
        .post(ctx.url("/users"))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("register failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let token = ctx.issue_token(&email, None).await;

    // Not an admin yet: the validly-signed token is not enough.
    let resp = ctx
        .client
        .get(ctx.url("/users"))
        .header(AUTHORIZATION, TestContext::bearer(&token))
        .send()
        .await
        .expect("list failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Promote the stored role directly, keeping the SAME token.
    sqlx::query("UPDATE users SET role = 'admin' WHERE email = $1")
        .bind(&email)
        .execute(&pool)
        .await
        .expect("promotion failed");

    // The gate re-reads the store, so the old token now passes.
    let resp = ctx
        .client
        .get(ctx.url("/users"))
        .header(AUTHORIZATION, TestContext::bearer(&token))
        .send()
        .await
        .expect("list failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let users: Vec<Value> = resp.json().await.expect("bad body");
    assert!(
        users.iter().any(|u| u["email"] == email.as_str()),
        "listing should include the promoted user"
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn duplicate_registration_is_a_noop() {
    let ctx = TestContext::new();
    let email = unique_email();

    let first = ctx
        .client
        .post(ctx.url("/users"))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("register failed");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = ctx
        .client
        .post(ctx.url("/users"))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("register failed");
    assert_eq!(second.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn admin_status_check_requires_authentication() {
    let ctx = TestContext::new();
    let email = unique_email();

    let resp = ctx
        .client
        .get(ctx.url(&format!("/users/admin/{email}")))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let token = ctx.issue_token(&email, None).await;
    let resp = ctx
        .client
        .get(ctx.url(&format!("/users/admin/{email}")))
        .header(AUTHORIZATION, TestContext::bearer(&token))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let is_admin: bool = resp.json().await.expect("bad body");
    assert!(!is_admin);
}
