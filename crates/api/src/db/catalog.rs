//! Menu and review repositories.
//!
//! Plain read-side plumbing; writes happen through the seeding CLI.

use rust_decimal::Decimal;
use sqlx::PgPool;

use bistro_core::{Amount, MenuItemId, ReviewId};

use super::RepositoryError;
use crate::models::{MenuItem, Review};

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: i32,
    name: String,
    category: String,
    description: Option<String>,
    image: Option<String>,
    price: Decimal,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: MenuItemId::new(row.id),
            name: row.name,
            category: row.category,
            description: row.description,
            image: row.image,
            price: Amount::new(row.price),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    name: String,
    details: String,
    rating: i32,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::new(row.id),
            name: row.name,
            details: row.details,
            rating: row.rating,
        }
    }
}

/// Repository for menu reads.
pub struct MenuRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(
            r"
            SELECT id, name, category, description, image, price
            FROM menu_items
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }
}

/// Repository for review reads.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT id, name, details, rating
            FROM reviews
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}
