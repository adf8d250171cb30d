//! Cart domain types.

use serde::Serialize;

use bistro_core::{Amount, CartEntryId, Email, MenuItemId};

/// A single entry in a user's cart.
///
/// Entries carry a copy of the menu item's name, image, and price as of the
/// time they were added, so later menu edits do not retroactively change a
/// cart. Destroyed either individually or in bulk by settlement.
#[derive(Debug, Clone, Serialize)]
pub struct CartEntry {
    /// Unique entry ID.
    pub id: CartEntryId,
    /// Owning user's email.
    pub email: Email,
    /// The menu item this entry refers to.
    pub menu_item_id: MenuItemId,
    /// Item name at add-to-cart time.
    pub name: String,
    /// Item image at add-to-cart time.
    pub image: Option<String>,
    /// Item price at add-to-cart time.
    pub price: Amount,
}
