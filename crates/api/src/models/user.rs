//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bistro_core::{Email, Role, UserId};

/// A registered user (domain type).
///
/// The stored `role` is the only value authorization trusts; the role
/// embedded in a session token is never consulted for admin checks.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (unique key).
    pub email: Email,
    /// Display name, if one was provided at registration.
    pub name: Option<String>,
    /// Stored role; `None` is equivalent to a regular user.
    pub role: Option<Role>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
