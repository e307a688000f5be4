//! Money.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A non-negative, finite amount in the store currency.
///
/// Serialized as a bare JSON number so persisted records stay readable; a
/// negative or non-finite number fails deserialization.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    pub fn new(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Self(amount))
    }

    /// A whole-unit price; always valid.
    pub fn from_whole(amount: u32) -> Self {
        Self(f64::from(amount))
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    /// Price of `quantity` units.
    pub fn times(self, quantity: u32) -> f64 {
        self.0 * f64::from(quantity)
    }

    /// Total ordering (prices are never NaN).
    pub fn total_cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
