//! Payment repository.
//!
//! Payment rows are insert-only: settlement writes one record per successful
//! charge and nothing ever updates or deletes it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use bistro_core::{Amount, CartEntryId, Email, PaymentId};

use super::RepositoryError;
use crate::models::PaymentRecord;

/// Raw `payments` row; mapped into [`PaymentRecord`] after validation.
#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: i32,
    email: String,
    amount: Decimal,
    transaction_ref: String,
    cart_entry_ids: Vec<i32>,
    paid_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_domain(self) -> Result<PaymentRecord, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(PaymentRecord {
            id: PaymentId::new(self.id),
            email,
            amount: Amount::new(self.amount),
            transaction_ref: self.transaction_ref,
            cart_entry_ids: self
                .cart_entry_ids
                .into_iter()
                .map(CartEntryId::new)
                .collect(),
            paid_at: self.paid_at,
        })
    }
}

/// Repository for payment database operations.
pub struct PaymentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepository<'a> {
    /// Create a new payment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a settlement record.
    ///
    /// `cart_entry_ids` is stored verbatim: the set the client presented,
    /// not a recomputation from current cart contents.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert(
        &self,
        email: &Email,
        amount: Amount,
        transaction_ref: &str,
        cart_entry_ids: &[CartEntryId],
    ) -> Result<PaymentRecord, RepositoryError> {
        let raw_ids: Vec<i32> = cart_entry_ids.iter().map(CartEntryId::as_i32).collect();
        let row = sqlx::query_as::<_, PaymentRow>(
            r"
            INSERT INTO payments (email, amount, transaction_ref, cart_entry_ids)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, amount, transaction_ref, cart_entry_ids, paid_at
            ",
        )
        .bind(email.as_str())
        .bind(amount.as_decimal())
        .bind(transaction_ref)
        .bind(&raw_ids)
        .fetch_one(self.pool)
        .await?;

        row.into_domain()
    }

    /// List a user's settlement records, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored row is invalid.
    pub async fn list_by_email(
        &self,
        email: &Email,
    ) -> Result<Vec<PaymentRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r"
            SELECT id, email, amount, transaction_ref, cart_entry_ids, paid_at
            FROM payments
            WHERE email = $1
            ORDER BY paid_at DESC, id DESC
            ",
        )
        .bind(email.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_domain).collect()
    }
}
