//! Fixed-point amount type
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Amounts carry at most six fractional digits and are persisted as signed
//! 64-bit micro-units. On the wire they are plain JSON numbers.

use crate::errors::LedgerError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of fractional digits an amount may carry
pub const AMOUNT_SCALE: u32 = 6;

const MICROS_PER_UNIT: i64 = 1_000_000;

/// Monetary amount (balance or transfer value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Convert to storage micro-units.
    ///
    /// Fails if the amount carries more than six fractional digits or does
    /// not fit in an `i64` once scaled.
    pub fn to_micros(&self) -> Result<i64, LedgerError> {
        if self.0.normalize().scale() > AMOUNT_SCALE {
            return Err(LedgerError::InvalidInput(format!(
                "amount {} has more than {} decimal places",
                self.0, AMOUNT_SCALE
            )));
        }
        self.0
            .checked_mul(Decimal::from(MICROS_PER_UNIT))
            .and_then(|scaled| scaled.to_i64())
            .ok_or_else(|| LedgerError::InvalidInput(format!("amount {} is out of range", self.0)))
    }

    /// Rebuild an amount from storage micro-units.
    pub fn from_micros(micros: i64) -> Self {
        Self(Decimal::new(micros, AMOUNT_SCALE).normalize())
    }

    /// Render with exactly six fractional digits, e.g. `40.000000`.
    pub fn to_fixed_string(&self) -> String {
        let mut value = self.0;
        value.rescale(AMOUNT_SCALE);
        value.to_string()
    }
}

impl From<i64> for Amount {
    fn from(units: i64) -> Self {
        Self(Decimal::from(units))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .map(Self)
            .map_err(|e| LedgerError::InvalidInput(format!("invalid amount {:?}: {}", s, e)))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
