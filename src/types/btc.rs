//! Exact BTC amounts and quantity parsing.
//!
//! Amounts are kept as decimals end to end so that order totals and fees never
//! drift the way float arithmetic would.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency sign used in every rendered amount
pub const BTC_SIGN: char = '₿';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a valid amount")]
    Invalid(String),

    #[error("amount must be greater than zero, got {0}")]
    NotPositive(String),

    #[error("amount {0} is too large")]
    TooLarge(String),
}

/// A BTC-denominated amount.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Btc(Decimal);

impl Btc {
    pub const ZERO: Btc = Btc(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Build from an integer mantissa and a decimal scale (`scaled(125, 2)` is 1.25)
    pub fn scaled(mantissa: i64, scale: u32) -> Self {
        Self(Decimal::new(mantissa, scale))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    /// `None` when the sum leaves the decimal range
    pub fn checked_add(self, rhs: Btc) -> Option<Btc> {
        self.0.checked_add(rhs.0).map(Btc)
    }

    pub fn checked_mul(self, rhs: Decimal) -> Option<Btc> {
        self.0.checked_mul(rhs).map(Btc)
    }

    /// Parse a user-facing amount such as `₿0.001`, `0.5` or `₿12.5k`.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let trimmed = input.trim();
        let unsigned = trimmed.strip_prefix(BTC_SIGN).unwrap_or(trimmed).trim();
        parse_quantity(unsigned).map(Self)
    }

    /// Render with a fixed number of decimal places (`₿0.100`)
    pub fn fixed(self, decimal_places: u32) -> String {
        format!(
            "{BTC_SIGN}{:.*}",
            decimal_places as usize,
            self.0.round_dp(decimal_places)
        )
    }

    /// Render large amounts in thousands (`₿12.5k`), small ones as usual
    pub fn compact(self) -> String {
        let thousand = Decimal::from(1000);
        if self.0.abs() >= thousand {
            format!("{BTC_SIGN}{}k", (self.0 / thousand).round_dp(1).normalize())
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Btc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalized = self.0.normalize();
        if normalized.scale() == 0 {
            write!(f, "{BTC_SIGN}{normalized:.2}")
        } else {
            write!(f, "{BTC_SIGN}{normalized}")
        }
    }
}

impl FromStr for Btc {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Saturates at the decimal bounds; use [`Btc::checked_add`] where overflow
/// must be reported.
impl std::ops::Add for Btc {
    type Output = Btc;

    fn add(self, rhs: Btc) -> Btc {
        Btc(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Btc {
    fn sum<I: Iterator<Item = Btc>>(iter: I) -> Btc {
        iter.fold(Btc::ZERO, |acc, amount| acc + amount)
    }
}

/// Parse a plain quantity: `100`, `1,250`, `2.5k`.
///
/// Thousands separators are ignored and a trailing `k` multiplies by 1000.
pub fn parse_quantity(input: &str) -> Result<Decimal, AmountError> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(AmountError::Empty);
    }

    let (digits, multiplier) = match cleaned.strip_suffix(['k', 'K']) {
        Some(rest) => (rest, Decimal::from(1000)),
        None => (cleaned.as_str(), Decimal::ONE),
    };

    let value =
        Decimal::from_str(digits).map_err(|_| AmountError::Invalid(input.trim().to_string()))?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| AmountError::TooLarge(input.trim().to_string()))
}

/// Like [`parse_quantity`] but rejects zero and negative values
pub fn parse_positive_quantity(input: &str) -> Result<Decimal, AmountError> {
    let value = parse_quantity(input)?;
    if value <= Decimal::ZERO {
        return Err(AmountError::NotPositive(input.trim().to_string()));
    }
    Ok(value)
}

/// Format a signed percentage change (`+5.2%`, `-1.8%`)
pub fn format_change(change: Decimal) -> String {
    let normalized = change.normalize();
    if normalized.is_sign_negative() {
        format!("{normalized}%")
    } else {
        format!("+{normalized}%")
    }
}
