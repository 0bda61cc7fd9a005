//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::{ItemError, LineItem},
    pricing::{TotalPriceError, total_price},
};

/// Errors related to cart construction and mutation.
///
/// A failed operation never changes the cart.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item with this name is already in the cart.
    #[error("{0} is already in the cart")]
    DuplicateItem(String),

    /// Index passed to a removal was not in `[0, len)`.
    #[error("Index {index} is out of range for a cart with {len} items")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of items in the cart
        len: usize,
    },

    /// An item's currency differs from the cart currency (item name, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// The item itself was invalid.
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// An ordered list of uniquely named line items in a single currency.
#[derive(Clone, Debug, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given items, in order.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if two items share a name or an item is in another currency.
    pub fn with_items(
        items: impl IntoIterator<Item = LineItem>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let mut cart = Cart::new(currency);

        items
            .into_iter()
            .try_for_each(|item| cart.push(item).map(|_count| ()))?;

        Ok(cart)
    }

    /// Append an item, returning the new number of items.
    ///
    /// # Errors
    ///
    /// - [`CartError::DuplicateItem`]: an item with the same name is already present.
    /// - [`CartError::CurrencyMismatch`]: the item is priced in another currency.
    pub fn push(&mut self, item: LineItem) -> Result<usize, CartError> {
        if self.contains(item.name()) {
            return Err(CartError::DuplicateItem(item.name().to_string()));
        }

        let item_currency = item.price().currency();
        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.name().to_string(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        self.items.push(item);

        Ok(self.items.len())
    }

    /// Remove and return the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if `index` is not in `[0, len)`.
    pub fn remove(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        Ok(self.items.remove(index))
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Check whether an item with this name is in the cart.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Index of the item with this name, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();

        self.items.iter().position(|item| item.name() == name)
    }

    /// Get the item at `index`.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or currency mismatch error.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.items)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get the number of items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
