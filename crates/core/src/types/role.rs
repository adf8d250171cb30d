//! User roles for authorization decisions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown role string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown role: {0}")]
pub struct RoleError(pub String);

/// A user's role.
///
/// Stored in the credential store as lowercase text; a missing role column
/// is equivalent to [`Role::User`]. The role embedded in a token claim is
/// informational only: authorization re-reads the stored value on every
/// admin-gated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to user management and other admin-gated operations.
    Admin,
    /// Regular customer account.
    #[default]
    User,
}

impl Role {
    /// Returns the lowercase string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Whether this role passes the admin gate.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(RoleError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("superuser".parse::<Role>().is_err());
        // Case matters: the store only ever holds lowercase values.
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }
}
