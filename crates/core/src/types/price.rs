//! Type-safe price representation using decimal arithmetic.
//!
//! Shoutout prices arrive from the API as plain numbers (or numeric strings)
//! in euros. They are kept as [`Decimal`] so that the amount sent back in a
//! payment-intent request is exactly the amount that was displayed.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes accepted by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD => "$",
            Self::GBP => "£",
            Self::CHF => "CHF ",
        }
    }
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a euro price.
    #[must_use]
    pub const fn eur(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::EUR)
    }

    /// Format for display: whole amounts without decimals ("€25"),
    /// fractional amounts with two ("€25.50").
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.normalize();
        if amount.fract().is_zero() {
            format!("{}{}", self.currency_code.symbol(), amount.trunc())
        } else {
            format!("{}{:.2}", self.currency_code.symbol(), amount)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_euros() {
        assert_eq!(Price::eur(Decimal::new(25, 0)).display(), "€25");
        assert_eq!(Price::eur(Decimal::new(2500, 2)).display(), "€25");
    }

    #[test]
    fn test_display_fractional_euros() {
        assert_eq!(Price::eur(Decimal::new(255, 1)).display(), "€25.50");
        assert_eq!(Price::eur(Decimal::new(1999, 2)).display(), "€19.99");
    }

    #[test]
    fn test_display_other_currency() {
        let price = Price::new(Decimal::new(10, 0), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$10");
    }
}
