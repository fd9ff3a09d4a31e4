//! Validated product price.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number")]
    Invalid,
    /// The price is zero or negative.
    #[error("price must be greater than 0")]
    NotPositive,
    /// The price exceeds the allowed maximum.
    #[error("price must be at most {max}")]
    TooLarge {
        /// Maximum allowed whole value.
        max: i64,
    },
}

/// A product price.
///
/// Prices are decimal values strictly greater than zero and at most
/// 999999. Arithmetic stays in [`Decimal`]; conversion to `f64` happens
/// only at the JSON boundary.
///
/// ## Examples
///
/// ```
/// use storekeeper_core::Price;
///
/// assert!(Price::parse("19.99").is_ok());
/// assert!(Price::parse("999999").is_ok());
///
/// assert!(Price::parse("0").is_err());       // not positive
/// assert!(Price::parse("-5").is_err());      // negative
/// assert!(Price::parse("1000000").is_err()); // too large
/// assert!(Price::parse("abc").is_err());     // not a number
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// Maximum allowed price (inclusive).
    pub const MAX_WHOLE: i64 = 999_999;

    /// Parse a `Price` from a string.
    ///
    /// The input is trimmed before parsing.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number, is zero or
    /// negative, or exceeds [`Self::MAX_WHOLE`].
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let value: Decimal = s.trim().parse().map_err(|_| PriceError::Invalid)?;

        if value <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }

        if value > Decimal::from(Self::MAX_WHOLE) {
            return Err(PriceError::TooLarge {
                max: Self::MAX_WHOLE,
            });
        }

        Ok(Self(value))
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns the price as an `f64` for JSON payloads.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
