//! Exact cash amounts.
//!
//! Per-token rates are tiny (e.g. $0.20 per million tokens), so prices are
//! kept as decimals rather than floats: summing the same token counts against
//! the same rates always produces the same total.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AtomError;

/// A non-negative USD amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount. Negative amounts are rejected.
    pub fn new(amount: Decimal) -> Result<Self, AtomError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(AtomError::ConfigurationError(format!(
                "Price cannot be negative: {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// Per-token rate from a price quoted per million tokens.
    ///
    /// For literal rates such as the builtin table. `amount` must be
    /// non-negative; use [`Price::try_per_million`] for untrusted input.
    pub fn per_million(amount: Decimal) -> Self {
        debug_assert!(
            !amount.is_sign_negative() || amount.is_zero(),
            "negative per-million rate: {amount}"
        );
        Self(amount / Decimal::from(1_000_000u32))
    }

    /// Checked [`Price::per_million`]: negative amounts are rejected.
    pub fn try_per_million(amount: Decimal) -> Result<Self, AtomError> {
        Self::new(amount).map(|price| Self::per_million(price.0))
    }

    /// Parse `"$0.20"` or `"0.20"`.
    pub fn parse(s: &str) -> Result<Self, AtomError> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let amount = Decimal::from_str(digits)
            .map_err(|e| AtomError::ConfigurationError(format!("Invalid price '{s}': {e}")))?;
        Self::new(amount)
    }

    /// Cost of `tokens` units at this rate.
    pub fn times(self, tokens: u64) -> Self {
        Self(self.0 * Decimal::from(tokens))
    }

    pub const fn amount(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = AtomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
