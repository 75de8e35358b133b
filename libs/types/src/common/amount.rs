//! Fixed two-decimal transaction amounts
//!
//! Amounts are held as `rust_decimal::Decimal` rescaled to exactly two
//! fraction digits, so the rendered value is always `<int>.<2 digits>`.
//!
//! ## Rounding
//!
//! Inputs with more than two fraction digits are rounded half away from zero
//! (`19.999` → `20.00`, `0.005` → `0.01`). Negative and non-finite inputs are
//! rejected.

use crate::common::errors::AmountError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Non-negative amount in BRL with exactly two fraction digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TransactionAmount(Decimal);

impl TransactionAmount {
    /// Number of fraction digits in the rendered amount
    pub const SCALE: u32 = 2;

    /// Longest rendered amount the amount field accepts
    pub const MAX_LEN: usize = 13;

    /// Create from a decimal, rounding to two places
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative {
                value: value.to_string(),
            });
        }

        let mut rounded =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(Self::SCALE);
        // "-0" parses as a signed zero
        rounded.set_sign_positive(true);

        let formatted = rounded.to_string();
        if formatted.len() > Self::MAX_LEN {
            return Err(AmountError::TooLarge {
                len: formatted.len(),
                formatted,
                max: Self::MAX_LEN,
            });
        }

        Ok(Self(rounded))
    }

    /// Create from a decimal string with exact parsing
    ///
    /// This is the preferred constructor for user input and configuration.
    ///
    /// # Examples
    /// ```
    /// use pix_types::TransactionAmount;
    ///
    /// let amount = TransactionAmount::from_decimal_str("12.5").unwrap();
    /// assert_eq!(amount.to_string(), "12.50");
    /// ```
    pub fn from_decimal_str(s: &str) -> Result<Self, AmountError> {
        let decimal = Decimal::from_str(s.trim()).map_err(|_| AmountError::InvalidDecimal {
            input: s.to_string(),
        })?;
        Self::from_decimal(decimal)
    }

    /// Create from f64, rejecting NaN and infinity
    pub fn try_from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite { value });
        }
        if value < 0.0 {
            return Err(AmountError::Negative {
                value: value.to_string(),
            });
        }

        let decimal = Decimal::from_f64(value).ok_or(AmountError::InvalidDecimal {
            input: value.to_string(),
        })?;
        Self::from_decimal(decimal)
    }

    /// Create from a whole number of cents
    pub fn from_cents(cents: u64) -> Result<Self, AmountError> {
        Self::from_decimal(Decimal::from(cents) / Decimal::ONE_HUNDRED)
    }

    /// Underlying decimal value (always scale 2)
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Render as the amount field value, e.g. `"12.50"`
    pub fn to_field_value(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for TransactionAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl TryFrom<Decimal> for TransactionAmount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<TransactionAmount> for Decimal {
    fn from(amount: TransactionAmount) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_number_gets_two_fraction_digits() {
        assert_eq!(TransactionAmount::try_from_f64(7.0).unwrap().to_string(), "7.00");
        assert_eq!(TransactionAmount::from_decimal(dec!(7)).unwrap().to_string(), "7.00");
    }

    #[test]
    fn test_single_fraction_digit_is_padded() {
        assert_eq!(TransactionAmount::try_from_f64(12.5).unwrap().to_field_value(), "12.50");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(TransactionAmount::from_decimal_str("19.999").unwrap().to_string(), "20.00");
        assert_eq!(TransactionAmount::from_decimal_str("0.005").unwrap().to_string(), "0.01");
        assert_eq!(TransactionAmount::from_decimal_str("0.004").unwrap().to_string(), "0.00");
        assert_eq!(TransactionAmount::from_decimal_str("2.345").unwrap().to_string(), "2.35");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            TransactionAmount::try_from_f64(-1.0),
            Err(AmountError::Negative { .. })
        ));
        assert!(matches!(
            TransactionAmount::from_decimal(dec!(-0.01)),
            Err(AmountError::Negative { .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            TransactionAmount::try_from_f64(f64::NAN),
            Err(AmountError::NotFinite { .. })
        ));
        assert!(matches!(
            TransactionAmount::try_from_f64(f64::INFINITY),
            Err(AmountError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_invalid_string() {
        assert!(matches!(
            TransactionAmount::from_decimal_str("12,50"),
            Err(AmountError::InvalidDecimal { .. })
        ));
    }

    #[test]
    fn test_field_limit() {
        // 10 integer digits + "." + 2 = 13 characters
        assert!(TransactionAmount::from_decimal(dec!(9999999999.99)).is_ok());
        assert!(matches!(
            TransactionAmount::from_decimal(dec!(10000000000)),
            Err(AmountError::TooLarge { len: 14, .. })
        ));
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(TransactionAmount::from_cents(1250).unwrap().to_string(), "12.50");
        assert_eq!(TransactionAmount::from_cents(5).unwrap().to_string(), "0.05");
    }

    #[test]
    fn test_serde_uses_decimal() {
        let amount: TransactionAmount = serde_json::from_str("\"3.1\"").unwrap();
        assert_eq!(amount.to_string(), "3.10");
        assert!(serde_json::from_str::<TransactionAmount>("\"-3\"").is_err());
    }
}
