//! Pricing
//!
//! Derives price summaries from cart contents. Every figure is computed exactly from the
//! integer subtotal and rounded to whole minor units once; the total is rounded from its
//! exact value rather than summed from rounded parts.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::Cart,
    discounts::{DiscountError, percent_of, round_minor},
    items::LineItem,
    promotions::PromoCode,
};

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Errors that can occur while summarising a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Subtotal could not be calculated.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Tax or discount arithmetic overflowed.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Calculates the total price of a list of items
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price(items: &[LineItem]) -> Result<Money<'static, Currency>, TotalPriceError> {
    let first = items.first().ok_or(TotalPriceError::NoItems)?;

    let total = items.iter().try_fold(
        Money::from_minor(0, first.price().currency()),
        |acc, item| acc.add(*item.price()),
    )?;

    Ok(total)
}

/// Derived price figures for a cart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceSummary {
    item_count: usize,
    subtotal: Money<'static, Currency>,
    tax: Money<'static, Currency>,
    discount: Money<'static, Currency>,
    total: Money<'static, Currency>,
    promo: Option<PromoCode>,
}

impl PriceSummary {
    /// Number of line items summarised.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Sum of item prices.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Tax on the subtotal.
    pub fn tax(&self) -> Money<'static, Currency> {
        self.tax
    }

    /// Promo discount on the subtotal, zero without a promo.
    pub fn discount(&self) -> Money<'static, Currency> {
        self.discount
    }

    /// Amount payable: subtotal plus tax minus discount.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Promo code the discount came from.
    pub fn promo(&self) -> Option<PromoCode> {
        self.promo
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.subtotal.currency()
    }
}

/// Summarise a cart with the given tax rate and optional promo code.
///
/// # Errors
///
/// Returns a [`PricingError`] if the subtotal cannot be calculated or the arithmetic overflows.
pub fn summarize(
    cart: &Cart,
    tax_rate: &Percentage,
    promo: Option<PromoCode>,
) -> Result<PriceSummary, PricingError> {
    let currency = cart.currency();
    let subtotal = cart.subtotal()?.to_minor_units();

    let tax = percent_of(tax_rate, subtotal)?;
    let discount = match promo {
        Some(promo) => percent_of(&promo.rate(), subtotal)?,
        None => Decimal::ZERO,
    };

    let total = Decimal::from(subtotal)
        .checked_add(tax)
        .and_then(|value| value.checked_sub(discount))
        .ok_or(DiscountError::PercentConversion)?;

    Ok(PriceSummary {
        item_count: cart.len(),
        subtotal: Money::from_minor(subtotal, currency),
        tax: Money::from_minor(round_minor(tax)?, currency),
        discount: Money::from_minor(round_minor(discount)?, currency),
        total: Money::from_minor(round_minor(total)?, currency),
        promo,
    })
}
