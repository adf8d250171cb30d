//! Database operations for the Bistro `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Accounts and roles (the credential store)
//! - `menu_items` - The menu
//! - `reviews` - Customer reviews
//! - `cart_entries` - Per-email cart contents
//! - `payments` - Immutable settlement records
//!
//! Each repository borrows the shared [`PgPool`]; the pool itself is built
//! once at startup and handed to [`crate::state::AppState`]. There is no
//! global connection state.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p bistro-cli -- migrate
//! ```

pub mod cart;
pub mod catalog;
pub mod payments;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use catalog::{MenuRepository, ReviewRepository};
pub use payments::PaymentRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
