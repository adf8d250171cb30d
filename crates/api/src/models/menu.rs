//! Menu and review domain types.

use serde::Serialize;

use bistro_core::{Amount, MenuItemId, ReviewId};

/// An item on the menu.
#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Amount,
}

/// A customer review.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub name: String,
    pub details: String,
    /// 1-5 stars.
    pub rating: i32,
}
