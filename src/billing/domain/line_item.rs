//! Billable line items shared by invoices and offers.

use super::error::BillingDomainError;
use super::money::Money;
use serde::{Deserialize, Serialize};

/// One billable position: description, quantity, and unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    description: String,
    quantity: u32,
    unit_price: Money,
}

impl LineItem {
    /// Creates a validated line item.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::EmptyDescription`] for a blank
    /// description and [`BillingDomainError::ZeroQuantity`] for a quantity of
    /// zero.
    pub fn new(
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Result<Self, BillingDomainError> {
        let description = description.into().trim().to_owned();
        if description.is_empty() {
            return Err(BillingDomainError::EmptyDescription);
        }
        if quantity == 0 {
            return Err(BillingDomainError::ZeroQuantity);
        }
        Ok(Self {
            description,
            quantity,
            unit_price,
        })
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit price.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns quantity times unit price.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::AmountOverflow`] when the product
    /// exceeds the representable range.
    pub fn total(&self) -> Result<Money, BillingDomainError> {
        self.unit_price.checked_mul(self.quantity)
    }
}

/// Sums the totals of a slice of line items.
///
/// # Errors
///
/// Returns [`BillingDomainError::AmountOverflow`] when the sum exceeds the
/// representable range.
pub(crate) fn sum_totals(items: &[LineItem]) -> Result<Money, BillingDomainError> {
    items
        .iter()
        .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.total()?))
}
