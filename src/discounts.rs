//! Discount utilities
//!
//! Percentage arithmetic over integer minor units. Intermediate results stay exact; rounding
//! to whole minor units happens once, through [`round_minor`].

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Calculate `percent` of an amount in minor units, without rounding.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the multiplication overflows.
pub fn percent_of(percent: &Percentage, minor: i64) -> Result<Decimal, DiscountError> {
    // decimal_percentage doesn't expose the underlying Decimal
    ((*percent) * Decimal::ONE)
        .checked_mul(Decimal::from(minor))
        .ok_or(DiscountError::PercentConversion)
}

/// Round an exact minor-unit amount to whole minor units, midpoints away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the rounded value does not fit in an `i64`.
pub fn round_minor(value: Decimal) -> Result<i64, DiscountError> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
