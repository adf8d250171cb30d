//! Core types for the Bistro backend.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amount;
pub mod email;
pub mod id;
pub mod role;

pub use amount::{Amount, MINOR_UNITS_PER_UNIT};
pub use email::{Email, EmailError};
pub use id::*;
pub use role::{Role, RoleError};
