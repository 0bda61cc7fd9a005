//! Items

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised while constructing a line item.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    /// Names are the cart key, so they must contain something other than whitespace.
    #[error("Item name must not be empty")]
    EmptyName,

    /// Prices may not be negative.
    #[error("Item {0} has an invalid price: prices must not be negative")]
    InvalidPrice(String),
}

/// A named, priced entry in a cart.
///
/// Line items are immutable once created. The name is stored trimmed.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    name: String,
    price: Money<'static, Currency>,
}

impl LineItem {
    /// Creates a new line item.
    ///
    /// # Errors
    ///
    /// - [`ItemError::EmptyName`]: the name is empty after trimming.
    /// - [`ItemError::InvalidPrice`]: the price is below zero.
    pub fn new(name: &str, price: Money<'static, Currency>) -> Result<Self, ItemError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(ItemError::EmptyName);
        }

        if price.to_minor_units() < 0 {
            return Err(ItemError::InvalidPrice(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            price,
        })
    }

    /// Returns the name of the item
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price of the item
    pub fn price(&self) -> &Money<'static, Currency> {
        &self.price
    }
}
