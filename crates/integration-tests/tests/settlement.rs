//! Integration tests for charge intents and payment settlement.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running with a test-mode `STRIPE_SECRET_KEY`
//!
//! Run with: cargo test -p bistro-integration-tests -- --ignored

use bistro_integration_tests::TestContext;
use reqwest::{StatusCode, header::AUTHORIZATION};
use serde_json::{Value, json};
use uuid::Uuid;

fn unique_email() -> String {
    format!("settle-{}@test.bistro", Uuid::new_v4().simple())
}

/// Add a cart entry and return its id.
async fn add_cart_entry(ctx: &TestContext, email: &str, name: &str, price: f64) -> i64 {
    let resp = ctx
        .client
        .post(ctx.url("/cart"))
        .json(&json!({
            "email": email,
            "menu_item_id": 1,
            "name": name,
            "price": price
        }))
        .send()
        .await
        .expect("add to cart failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("bad body");
    body["id"].as_i64().expect("entry missing id")
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn charge_intent_below_minimum_is_rejected() {
    let ctx = TestContext::new();
    let token = ctx.issue_token(&unique_email(), None).await;

    let resp = ctx
        .client
        .post(ctx.url("/payments/intent"))
        .header(AUTHORIZATION, TestContext::bearer(&token))
        .json(&json!({ "price": 0.001 }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server, database, and test-mode charge key"]
async fn charge_intent_returns_client_secret() {
    let ctx = TestContext::new();
    let token = ctx.issue_token(&unique_email(), None).await;

    let resp = ctx
        .client
        .post(ctx.url("/payments/intent"))
        .header(AUTHORIZATION, TestContext::bearer(&token))
        .json(&json!({ "price": 12.5 }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("bad body");
    let secret = body["clientSecret"].as_str().expect("missing clientSecret");
    assert!(!secret.is_empty());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn charge_intent_requires_authentication() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/payments/intent"))
        .json(&json!({ "price": 12.5 }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn settlement_clears_exactly_the_presented_entries() {
    let ctx = TestContext::new();
    let email = unique_email();
    let token = ctx.issue_token(&email, None).await;

    let id1 = add_cart_entry(&ctx, &email, "Roast Duck Breast", 14.5).await;
    let id2 = add_cart_entry(&ctx, &email, "Crème Brûlée", 6.5).await;
    // A third entry that is NOT part of the settlement and must survive it.
    let id3 = add_cart_entry(&ctx, &email, "Fresh Lime Soda", 3.5).await;

    let tx_ref = format!("pi_test_{}", Uuid::new_v4().simple());
    let resp = ctx
        .client
        .post(ctx.url("/payments"))
        .header(AUTHORIZATION, TestContext::bearer(&token))
        .json(&json!({
            "email": email,
            "amount": 21.0,
            "transaction_ref": tx_ref,
            "cart_entry_ids": [id1, id2]
        }))
        .send()
        .await
        .expect("settle failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let outcome: Value = resp.json().await.expect("bad body");
    assert_eq!(outcome["deleted_entries"], 2);
    assert_eq!(outcome["payment"]["email"], email.as_str());
    assert_eq!(outcome["payment"]["transaction_ref"], tx_ref.as_str());

    // The settled entries are gone from the listing; the third remains.
    let resp = ctx
        .client
        .get(ctx.url(&format!("/cart?email={email}")))
        .send()
        .await
        .expect("cart listing failed");
    let entries: Vec<Value> = resp.json().await.expect("bad body");
    let remaining: Vec<i64> = entries
        .iter()
        .filter_map(|e| e["id"].as_i64())
        .collect();
    assert!(!remaining.contains(&id1));
    assert!(!remaining.contains(&id2));
    assert!(remaining.contains(&id3));

    // Exactly one payment record referencing both settled ids.
    let resp = ctx
        .client
        .get(ctx.url(&format!("/payments/{email}")))
        .header(AUTHORIZATION, TestContext::bearer(&token))
        .send()
        .await
        .expect("history failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let records: Vec<Value> = resp.json().await.expect("bad body");
    assert_eq!(records.len(), 1);
    let ids: Vec<i64> = records[0]["cart_entry_ids"]
        .as_array()
        .expect("missing id set")
        .iter()
        .filter_map(Value::as_i64)
        .collect();
    assert_eq!(ids, vec![id1, id2]);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn settlement_with_stale_ids_still_records_the_payment() {
    // Settling ids that no longer exist deletes nothing, but the payment
    // record must still be written (insert runs first and is never rolled
    // back).
    let ctx = TestContext::new();
    let email = unique_email();
    let token = ctx.issue_token(&email, None).await;

    let tx_ref = format!("pi_test_{}", Uuid::new_v4().simple());
    let resp = ctx
        .client
        .post(ctx.url("/payments"))
        .header(AUTHORIZATION, TestContext::bearer(&token))
        .json(&json!({
            "email": email,
            "amount": 5.0,
            "transaction_ref": tx_ref,
            "cart_entry_ids": [999_999_001, 999_999_002]
        }))
        .send()
        .await
        .expect("settle failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let outcome: Value = resp.json().await.expect("bad body");
    assert_eq!(outcome["deleted_entries"], 0);

    let resp = ctx
        .client
        .get(ctx.url(&format!("/payments/{email}")))
        .header(AUTHORIZATION, TestContext::bearer(&token))
        .send()
        .await
        .expect("history failed");
    let records: Vec<Value> = resp.json().await.expect("bad body");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["transaction_ref"], tx_ref.as_str());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn payment_history_requires_authentication() {
    let ctx = TestContext::new();
    let email = unique_email();

    let resp = ctx
        .client
        .get(ctx.url(&format!("/payments/{email}")))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
