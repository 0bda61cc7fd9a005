//! Prices
//!
//! Conversions between decimal amounts in major units (as written in catalogs and
//! stored carts) and [`Money`] held in integer minor units.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

/// Number of decimal places in the minor unit of every supported currency.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Errors that can occur while parsing or converting prices.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The price string was not in the `AMOUNT CURRENCY` format.
    #[error("Invalid price format: {0}")]
    InvalidFormat(String),

    /// Prices may not be negative.
    #[error("Price must not be negative, got {0}")]
    Negative(Decimal),

    /// The amount has more decimal places than the currency's minor unit.
    #[error("Price {0} is more precise than the currency allows")]
    SubMinorPrecision(Decimal),

    /// The amount does not fit in minor units.
    #[error("Price {0} is out of range")]
    OutOfRange(Decimal),

    /// Currency code is not one of the supported currencies.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by its ISO alpha code (case-insensitive).
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for anything other than `GBP`, `USD` or `EUR`.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        _ => Err(PriceError::UnknownCurrency(code.to_string())),
    }
}

/// Convert an amount in major units into money held in minor units.
///
/// # Errors
///
/// - [`PriceError::Negative`]: the amount is below zero.
/// - [`PriceError::SubMinorPrecision`]: the amount has fractional minor units.
/// - [`PriceError::OutOfRange`]: the amount does not fit in an `i64` of minor units.
pub fn money_from_decimal(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PriceError> {
    if amount < Decimal::ZERO {
        return Err(PriceError::Negative(amount));
    }

    let minor = amount
        .checked_mul(Decimal::new(100, 0))
        .ok_or(PriceError::OutOfRange(amount))?;

    if !minor.fract().is_zero() {
        return Err(PriceError::SubMinorPrecision(amount));
    }

    let minor = minor.to_i64().ok_or(PriceError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor, currency))
}

/// Express money as a decimal amount in major units.
pub fn money_to_decimal(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), MINOR_UNIT_SCALE)
}

/// Parse a price string (e.g. `"59.99 USD"`) into money.
///
/// # Errors
///
/// Returns an error if the string is not in the format `AMOUNT CURRENCY`, the amount is not
/// a valid non-negative decimal, or the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, PriceError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(PriceError::InvalidFormat(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidFormat(s.to_string()))?;

    let currency = currency_from_code(currency_code)?;

    money_from_decimal(amount, currency)
}
