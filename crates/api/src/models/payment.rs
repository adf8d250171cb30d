//! Payment domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bistro_core::{Amount, CartEntryId, Email, PaymentId};

/// An immutable settlement record.
///
/// Created exactly once per successful settlement and never mutated
/// afterwards; this is the audit trail correlating a charge to the cart
/// entries it consumed. `cart_entry_ids` is exactly the set the client
/// presented at settlement time, not a recomputation from cart contents.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRecord {
    /// Unique payment ID.
    pub id: PaymentId,
    /// Paying user's email.
    pub email: Email,
    /// Amount in base currency units.
    pub amount: Amount,
    /// Reference returned by the charge processor.
    pub transaction_ref: String,
    /// The cart entries this payment settled.
    pub cart_entry_ids: Vec<CartEntryId>,
    /// When the settlement was recorded.
    pub paid_at: DateTime<Utc>,
}
