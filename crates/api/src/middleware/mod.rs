//! Request-interception layer: the access gate.

pub mod auth;

pub use auth::{AuthError, RequireAdmin, RequireAuth};
