//! Monetary amounts in the store's base currency unit.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minor units per base currency unit (cents per dollar).
pub const MINOR_UNITS_PER_UNIT: u32 = 100;

/// A monetary amount in base currency units (dollars, not cents).
///
/// Wraps a [`Decimal`] so arithmetic never goes through floating point.
/// On the wire the amount is a plain JSON number (`12.5`), matching what
/// ordering clients send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Convert to the charge processor's integer minor-unit representation.
    ///
    /// Multiplies by [`MINOR_UNITS_PER_UNIT`] and truncates toward zero, so
    /// `12.5` becomes `1250` and `0.001` becomes `0`. Returns `None` if the
    /// result does not fit in an `i64`.
    #[must_use]
    pub fn to_minor_units(&self) -> Option<i64> {
        (self.0 * Decimal::from(MINOR_UNITS_PER_UNIT)).trunc().to_i64()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Serialized as a JSON number rather than rust_decimal's default string form.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}
