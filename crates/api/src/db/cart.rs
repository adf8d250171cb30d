//! Cart repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use bistro_core::{Amount, CartEntryId, Email, MenuItemId};

use super::RepositoryError;
use crate::models::CartEntry;

/// Raw `cart_entries` row; mapped into [`CartEntry`] after validation.
#[derive(sqlx::FromRow)]
struct CartEntryRow {
    id: i32,
    email: String,
    menu_item_id: i32,
    name: String,
    image: Option<String>,
    price: Decimal,
}

impl CartEntryRow {
    fn into_domain(self) -> Result<CartEntry, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(CartEntry {
            id: CartEntryId::new(self.id),
            email,
            menu_item_id: MenuItemId::new(self.menu_item_id),
            name: self.name,
            image: self.image,
            price: Amount::new(self.price),
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's cart entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored row is invalid.
    pub async fn list_by_email(&self, email: &Email) -> Result<Vec<CartEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartEntryRow>(
            r"
            SELECT id, email, menu_item_id, name, image, price
            FROM cart_entries
            WHERE email = $1
            ORDER BY id
            ",
        )
        .bind(email.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartEntryRow::into_domain).collect()
    }

    /// Add an entry to a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert(
        &self,
        email: &Email,
        menu_item_id: MenuItemId,
        name: &str,
        image: Option<&str>,
        price: Amount,
    ) -> Result<CartEntry, RepositoryError> {
        let row = sqlx::query_as::<_, CartEntryRow>(
            r"
            INSERT INTO cart_entries (email, menu_item_id, name, image, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, menu_item_id, name, image, price
            ",
        )
        .bind(email.as_str())
        .bind(menu_item_id.as_i32())
        .bind(name)
        .bind(image)
        .bind(price.as_decimal())
        .fetch_one(self.pool)
        .await?;

        row.into_domain()
    }

    /// Remove a single entry. Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CartEntryId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_entries WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Remove every entry whose id is in the given set, in one statement.
    ///
    /// Used by settlement with the client-presented id list; ids that no
    /// longer exist are simply not counted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_many(&self, ids: &[CartEntryId]) -> Result<u64, RepositoryError> {
        let raw: Vec<i32> = ids.iter().map(CartEntryId::as_i32).collect();
        let result = sqlx::query("DELETE FROM cart_entries WHERE id = ANY($1)")
            .bind(&raw)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
