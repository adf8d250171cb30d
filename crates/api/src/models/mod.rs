//! Domain types for the ordering backend.
//!
//! These types represent validated domain objects separate from database row
//! types; repositories map raw rows into them and reject corrupt data.

pub mod cart;
pub mod menu;
pub mod payment;
pub mod user;

pub use cart::CartEntry;
pub use menu::{MenuItem, Review};
pub use payment::PaymentRecord;
pub use user::User;
