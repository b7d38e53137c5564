//! Quantities

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

/// Rejected quantity input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantity below zero.
    #[error("quantity {0} is negative")]
    Negative(String),

    /// Quantity with a fractional part.
    #[error("quantity {0} is not a whole number")]
    NotInteger(String),

    /// Input that is not a number at all.
    #[error("quantity {0:?} is not a number")]
    NotANumber(String),

    /// Quantity larger than any stock could hold.
    #[error("quantity {0} is too large")]
    TooLarge(String),

    /// Zero where at least one unit is required.
    #[error("quantity must be at least 1")]
    Zero,
}

/// A validated, non-negative whole quantity as typed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Quantity(u32);

impl Quantity {
    /// Returns the quantity as an integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Checks whether the quantity is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(QuantityError::Negative(value.to_string()));
        }

        u32::try_from(value)
            .map(Self)
            .map_err(|_overflow| QuantityError::TooLarge(value.to_string()))
    }
}

impl TryFrom<i32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<&str> for Quantity {
    type Error = QuantityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();

        let value =
            Decimal::from_str(raw).map_err(|_parse| QuantityError::NotANumber(raw.to_string()))?;

        if value.is_sign_negative() && !value.is_zero() {
            return Err(QuantityError::Negative(raw.to_string()));
        }

        if !value.fract().is_zero() {
            return Err(QuantityError::NotInteger(raw.to_string()));
        }

        value
            .to_u32()
            .map(Self)
            .ok_or_else(|| QuantityError::TooLarge(raw.to_string()))
    }
}
