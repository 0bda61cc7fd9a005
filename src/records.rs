//! Stored cart records
//!
//! A cart is persisted as a JSON array of `{"name": string, "price": number}` records, prices
//! in major units, in cart order. Prices are written and read as exact decimal literals, never
//! through `f64`.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    items::{ItemError, LineItem},
    prices::{PriceError, money_from_decimal, money_to_decimal},
};

/// Errors raised while encoding or decoding stored carts.
#[derive(Debug, Error)]
pub enum RecordError {
    /// JSON could not be parsed or written.
    #[error("Invalid cart JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored price is not a valid price.
    #[error("Invalid stored price: {0}")]
    Price(#[from] PriceError),

    /// A stored item is not a valid line item.
    #[error("Invalid stored item: {0}")]
    Item(#[from] ItemError),

    /// The stored items do not form a valid cart.
    #[error("Invalid stored cart: {0}")]
    Cart(#[from] CartError),
}

/// A single stored line item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItemRecord {
    /// Item name
    pub name: String,

    /// Item price in major units
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

impl From<&LineItem> for LineItemRecord {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name().to_string(),
            price: money_to_decimal(item.price()).normalize(),
        }
    }
}

impl LineItemRecord {
    /// Convert the record into a line item priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the price or name is invalid.
    pub fn into_line_item(self, currency: &'static Currency) -> Result<LineItem, RecordError> {
        let price = money_from_decimal(self.price, currency)?;

        Ok(LineItem::new(&self.name, price)?)
    }
}

/// Serialise the full cart.
///
/// # Errors
///
/// Returns [`RecordError::Json`] if serialisation fails.
pub fn encode_cart(cart: &Cart) -> Result<String, RecordError> {
    let records: Vec<LineItemRecord> = cart.iter().map(LineItemRecord::from).collect();

    Ok(serde_json::to_string(&records)?)
}

/// Rebuild a cart from its stored form.
///
/// # Errors
///
/// Returns a [`RecordError`] if the JSON is malformed or any record breaks a cart invariant
/// (blank or duplicate names, negative or over-precise prices).
pub fn decode_cart(json: &str, currency: &'static Currency) -> Result<Cart, RecordError> {
    let records: Vec<LineItemRecord> = serde_json::from_str(json)?;

    let items = records
        .into_iter()
        .map(|record| record.into_line_item(currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Cart::with_items(items, currency)?)
}
