//! Payment settlement: charge-intent creation and the insert-then-delete
//! settlement sequence.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;

use bistro_core::{Amount, CartEntryId, Email};

use super::charge::{ChargeClient, ChargeError};
use crate::db::{CartRepository, PaymentRepository, RepositoryError};
use crate::models::PaymentRecord;

/// Errors from settlement operations.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The requested amount converts to zero minor units.
    #[error("amount is below the minimum chargeable value")]
    BelowMinimum,

    /// The requested amount cannot be represented in minor units.
    #[error("amount is not representable in minor units")]
    InvalidAmount,

    /// Charge processor failure.
    #[error(transparent)]
    Charge(#[from] ChargeError),

    /// Store failure during the settlement sequence.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Payment payload presented by the client at settlement time.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettleRequest {
    /// The payer's email.
    pub email: Email,
    /// Amount charged, in base currency units.
    pub amount: Amount,
    /// Processor transaction reference from the confirmed charge.
    pub transaction_ref: String,
    /// The cart entries being paid for. This exact list drives the delete
    /// step; the coordinator never re-queries the cart for it.
    pub cart_entry_ids: Vec<CartEntryId>,
}

/// Result of a completed settlement.
#[derive(Debug, Serialize)]
pub struct SettlementOutcome {
    /// The settlement record as inserted.
    pub payment: PaymentRecord,
    /// How many cart entries the delete step removed.
    pub deleted_entries: u64,
}

/// Coordinates amount validation, charge authorization, and the two-step
/// settlement persistence sequence.
pub struct SettlementCoordinator<'a> {
    pool: &'a PgPool,
    charge: &'a ChargeClient,
}

impl<'a> SettlementCoordinator<'a> {
    /// Create a new coordinator over the shared pool and charge client.
    #[must_use]
    pub const fn new(pool: &'a PgPool, charge: &'a ChargeClient) -> Self {
        Self { pool, charge }
    }

    /// Validate an amount and request an unconfirmed charge intent from the
    /// processor, returning its client-usable secret.
    ///
    /// Performs no persistence.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::BelowMinimum` if the amount converts to
    /// less than one minor unit, `SettlementError::InvalidAmount` if it is
    /// not representable, or a `Charge` error from the processor.
    pub async fn create_charge_intent(&self, amount: Amount) -> Result<String, SettlementError> {
        let minor = validated_minor_units(amount)?;
        let intent = self.charge.create_card_intent(minor).await?;
        Ok(intent.client_secret)
    }

    /// Record a payment and retract the purchased entries from the cart.
    ///
    /// The payment row is written before the cart is cleared: a failure in
    /// the delete step leaves a cart entry that lingers after a successful
    /// charge, never a charge without an audit trail. The two statements are
    /// independent atomic operations, not one transaction.
    ///
    /// # Errors
    ///
    /// Store failures in either step are surfaced as-is; a delete-step
    /// failure does not roll back the insert.
    pub async fn settle(&self, request: SettleRequest) -> Result<SettlementOutcome, SettlementError> {
        let payment = PaymentRepository::new(self.pool)
            .insert(
                &request.email,
                request.amount,
                &request.transaction_ref,
                &request.cart_entry_ids,
            )
            .await?;

        let deleted_entries = match CartRepository::new(self.pool)
            .delete_many(&request.cart_entry_ids)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                // The one place an inconsistency can silently persist:
                // the payment exists but its cart entries were not removed.
                tracing::error!(
                    payment_id = %payment.id,
                    error = %e,
                    "cart deletion failed after payment insert; entries remain settled but listed"
                );
                return Err(e.into());
            }
        };

        tracing::info!(
            payment_id = %payment.id,
            email = %payment.email,
            deleted_entries,
            "settlement complete"
        );

        Ok(SettlementOutcome {
            payment,
            deleted_entries,
        })
    }
}

/// Convert an amount to minor units, rejecting anything below one.
fn validated_minor_units(amount: Amount) -> Result<i64, SettlementError> {
    let minor = amount
        .to_minor_units()
        .ok_or(SettlementError::InvalidAmount)?;
    if minor < 1 {
        return Err(SettlementError::BelowMinimum);
    }
    Ok(minor)
}
