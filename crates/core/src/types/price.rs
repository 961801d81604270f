//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error constructing a [`Price`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Unit prices are never negative in the catalog.
    #[error("price amount must not be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative unit price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Create a price from an amount in the smallest currency unit (e.g., cents).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `minor_units` is below zero.
    pub fn from_minor_units(
        minor_units: i64,
        currency_code: CurrencyCode,
    ) -> Result<Self, PriceError> {
        Self::new(Decimal::new(minor_units, 2), currency_code)
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Get the currency code.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol for display formatting.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }
}
