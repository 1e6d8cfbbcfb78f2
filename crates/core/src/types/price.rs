//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The input string is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative monetary amount.
///
/// Catalog prices and order totals are decimal, never floating point.
/// Serialized as a decimal string (e.g. `"12.99"`) so the JSON copies
/// embedded in persisted orders round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse a price from its decimal string form (e.g. `"12.99"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a decimal number or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(s).map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    /// Formats as a plain decimal with two fraction digits, e.g. `12.99`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Sum for Price {
    /// Sum of non-negative prices is non-negative, so no re-validation.
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1299);
        assert_eq!(price.amount(), Decimal::new(1299, 2));
        assert_eq!(price.to_string(), "12.99");
    }

    #[test]
    fn test_parse_round_trip() {
        let price = Price::parse("15.99").expect("valid price");
        assert_eq!(Price::parse(&price.to_string()).expect("round trip"), price);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Price::parse("twelve"),
            Err(PriceError::Invalid(_))
        ));
        assert!(matches!(
            Price::parse("-1.50"),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(1299), Price::from_cents(1599)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(2898));
    }
}
