//! Pricing

use std::num::NonZeroU32;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while converting or summing amounts.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("amount {0} is negative")]
    Negative(Decimal),

    /// The amount does not fit into the minor units of its currency.
    #[error("amount overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Converts a backend decimal amount (e.g. `"1500.00"`) into money of the given currency.
///
/// Amounts with more decimal places than the currency supports are rounded half away from zero.
///
/// # Errors
///
/// - [`PriceError::Negative`]: the amount is below zero.
/// - [`PriceError::Overflow`]: the amount does not fit into minor units.
pub fn money_from_decimal(
    amount: Decimal,
    currency: &Currency,
) -> Result<Money<'_, Currency>, PriceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount));
    }

    let scaled = (0..currency.exponent)
        .try_fold(amount, |acc, _| acc.checked_mul(Decimal::TEN))
        .ok_or(PriceError::Overflow)?;

    let minor = scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PriceError::Overflow)?;

    Ok(Money::from_minor(minor, currency))
}

/// Converts money back into the decimal representation the backend expects.
pub fn decimal_from_money(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Calculates `unit_price * quantity`.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] when the product does not fit into minor units.
pub fn line_subtotal<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: NonZeroU32,
) -> Result<Money<'a, Currency>, PriceError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity.get()))
        .ok_or(PriceError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Calculates the sum of all line subtotals; zero in `currency` when there are no lines.
///
/// # Errors
///
/// - [`PriceError::Overflow`]: the sum does not fit into minor units.
/// - [`PriceError::Money`]: a line is priced in a different currency.
pub fn total_price<'a>(
    items: &[LineItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PriceError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            if item.subtotal().currency() != currency {
                return Err(PriceError::Money(MoneyError::CurrencyMismatch {
                    expected: currency.iso_alpha_code,
                    actual: item.subtotal().currency().iso_alpha_code,
                }));
            }

            let minor = acc
                .to_minor_units()
                .checked_add(item.subtotal().to_minor_units())
                .ok_or(PriceError::Overflow)?;

            Ok(Money::from_minor(minor, currency))
        })
}
