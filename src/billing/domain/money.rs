//! Integer-cent monetary amounts.

use super::error::BillingDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary amount in integer cents.
///
/// All arithmetic is checked; overflow surfaces as
/// [`BillingDomainError::AmountOverflow`] instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from integer cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount in integer cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Adds two amounts.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::AmountOverflow`] when the sum exceeds
    /// the representable range.
    pub fn checked_add(self, other: Self) -> Result<Self, BillingDomainError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(BillingDomainError::AmountOverflow)
    }

    /// Multiplies the amount by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::AmountOverflow`] when the product
    /// exceeds the representable range.
    pub fn checked_mul(self, quantity: u32) -> Result<Self, BillingDomainError> {
        self.0
            .checked_mul(i64::from(quantity))
            .map(Self)
            .ok_or(BillingDomainError::AmountOverflow)
    }
}

impl fmt::Display for Money {
    /// Formats as a decimal amount, e.g. `12.34` or `-0.05`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = format!("{:03}", self.0.unsigned_abs());
        let (whole, fraction) = digits.split_at(digits.len().saturating_sub(2));
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{whole}.{fraction}")
    }
}
