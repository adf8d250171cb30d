//! HTTP route handlers for the ordering API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness check
//! GET    /health/ready          - Readiness check (DB ping)
//!
//! # Tokens
//! POST   /jwt                   - Issue a session token
//!
//! # Users
//! POST   /users                 - Register (create-if-absent)
//! GET    /users                 - List users (auth + admin)
//! GET    /users/admin/{email}   - Admin status check (auth)
//! PATCH  /users/{id}            - Partial update (auth)
//! DELETE /users/{id}            - Delete (auth + admin)
//!
//! # Catalog
//! GET    /menu                  - Full menu
//! GET    /reviews               - All reviews
//!
//! # Cart
//! GET    /cart?email=           - List a user's cart
//! POST   /cart                  - Add an entry
//! DELETE /cart/{id}             - Remove an entry
//!
//! # Payments
//! POST   /payments/intent       - Create a charge intent (auth)
//! POST   /payments              - Settle a payment (auth)
//! GET    /payments/{email}      - Payment history (auth)
//! ```

pub mod auth;
pub mod cart;
pub mod menu;
pub mod payments;
pub mod reviews;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    use axum::routing::patch;

    Router::new()
        .route("/", post(users::register).get(users::list))
        .route("/admin/{email}", get(users::admin_status))
        .route("/{id}", patch(users::update).delete(users::delete))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::list).post(cart::add))
        .route("/{id}", axum::routing::delete(cart::remove))
}

/// Create the payment routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(payments::settle))
        .route("/intent", post(payments::create_intent))
        .route("/{email}", get(payments::history))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Token issuance
        .route("/jwt", post(auth::issue_token))
        // User routes
        .nest("/users", user_routes())
        // Catalog
        .route("/menu", get(menu::list))
        .route("/reviews", get(reviews::list))
        // Cart routes
        .nest("/cart", cart_routes())
        // Payment routes
        .nest("/payments", payment_routes())
}
