//! Coin amounts.
//!
//! Amounts in input files are written in whole coins and may carry a
//! fractional part. They are held as arbitrary-precision decimals so the
//! conversion to the smallest unit is exact at any magnitude.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places between one coin and the smallest unit.
pub const CORE_DECIMALS: i64 = 18;

/// Largest decimal exponent, in either direction, accepted in an amount.
pub const MAX_AMOUNT_EXPONENT: i64 = 1000;

/// A non-negative amount of coins.
///
/// # Example
///
/// ```rust
/// use pigeon::types::Amount;
///
/// let amount: Amount = "1.5".parse().unwrap();
/// assert_eq!(amount.to_smallest_unit().to_string(), "1500000000000000000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Amount(BigDecimal);

impl Amount {
    /// Returns the amount in the chain's smallest unit.
    ///
    /// Digits beyond the 18th decimal place are truncated.
    pub fn to_smallest_unit(&self) -> BigUint {
        let unit = BigDecimal::new(BigInt::from(1u8), -CORE_DECIMALS);
        let (units, _) = (&self.0 * &unit).with_scale(0).into_bigint_and_exponent();
        // Non-negative by construction, so the conversion cannot fail.
        units.to_biguint().unwrap_or_default()
    }

}

/// Error returned when an amount string is not a non-negative decimal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAmountError(String);

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseAmountError {}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = BigDecimal::from_str(s)
            .map_err(|_| ParseAmountError(format!("invalid amount {s:?}")))?;
        if value.sign() == Sign::Minus {
            return Err(ParseAmountError(format!(
                "amount must not be negative, got {s}"
            )));
        }
        let (_, scale) = value.normalized().as_bigint_and_exponent();
        if !(-MAX_AMOUNT_EXPONENT..=MAX_AMOUNT_EXPONENT).contains(&scale) {
            return Err(ParseAmountError(format!(
                "amount {s} is out of range: exponent must be within {MAX_AMOUNT_EXPONENT}"
            )));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
