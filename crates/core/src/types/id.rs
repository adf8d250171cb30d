//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Repositories bind
//! the raw `i32` and re-wrap on the way out, so no database trait
//! implementations are needed here.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use bistro_core::define_id;
/// define_id!(UserId);
/// define_id!(PaymentId);
///
/// let user_id = UserId::new(1);
/// let payment_id = PaymentId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: UserId = payment_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Entity IDs used across the backend
define_id!(UserId);
define_id!(MenuItemId);
define_id!(ReviewId);
define_id!(CartEntryId);
define_id!(PaymentId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let id = CartEntryId::new(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(CartEntryId::from(42), id);
        assert_eq!(i32::from(id), 42);
    }

    #[test]
    fn test_display() {
        assert_eq!(UserId::new(7).to_string(), "7");
    }

    #[test]
    fn test_serde_transparent() {
        let id = PaymentId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
        let parsed: PaymentId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, id);
    }
}
