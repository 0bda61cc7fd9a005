//! Cart store
//!
//! Owns the cart for a session: loads it once from [`Storage`], writes the full cart back
//! after every successful mutation and derives price summaries on demand.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    cart::{Cart, CartError},
    config::StoreConfig,
    items::LineItem,
    pricing::{PriceSummary, PricingError, summarize},
    promotions::{PromoCode, PromoError},
    records::{RecordError, decode_cart, encode_cart},
    storage::{Storage, StorageError},
};

/// Errors returned by cart store operations.
///
/// A failed operation leaves both the in-memory cart and storage unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Cart invariant violated (duplicate name, bad index, invalid item).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Promo code was not recognised.
    #[error(transparent)]
    Promo(#[from] PromoError),

    /// Summary arithmetic failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Cart could not be encoded for storage.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Storage could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Checkout requested for an empty cart.
    #[error("Cart is empty")]
    EmptyCart,
}

/// A cart bound to its storage.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    config: StoreConfig,
    cart: Cart,
    promo: Option<PromoCode>,
}

impl<S: Storage> CartStore<S> {
    /// Open the store, loading the cart saved under the configured key.
    ///
    /// Absent or malformed stored data yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the storage backend itself cannot be read.
    pub fn open(storage: S, config: StoreConfig) -> Result<Self, StoreError> {
        let stored = match storage.load(&config.storage_key) {
            Ok(Some(json)) => decode_cart(&json, config.currency).map_err(StoreError::from),
            Ok(None) => Ok(Cart::new(config.currency)),
            Err(err @ StorageError::NotUtf8(_)) => Err(StoreError::from(err)),
            Err(err) => return Err(err.into()),
        };

        let cart = stored.unwrap_or_else(|err| {
            warn!(
                key = %config.storage_key,
                error = %err,
                "discarding malformed stored cart"
            );

            Cart::new(config.currency)
        });

        debug!(key = %config.storage_key, items = cart.len(), "opened cart store");

        Ok(Self {
            storage,
            config,
            cart,
            promo: None,
        })
    }

    /// Add an item, returning the new number of items.
    ///
    /// # Errors
    ///
    /// - [`CartError::DuplicateItem`]: an item with this name is already in the cart.
    /// - [`CartError::Item`] or [`CartError::CurrencyMismatch`]: the item is invalid.
    /// - [`StoreError::Storage`]: the cart could not be persisted.
    pub fn add_item(
        &mut self,
        name: &str,
        price: Money<'static, Currency>,
    ) -> Result<usize, StoreError> {
        let item = LineItem::new(name, price).map_err(CartError::from)?;
        let added = item.name().to_string();

        let count = self.mutate(|cart| cart.push(item))?;

        debug!(name = %added, count, "added item to cart");

        Ok(count)
    }

    /// Remove the item at `index`, returning its name.
    ///
    /// # Errors
    ///
    /// - [`CartError::IndexOutOfRange`]: `index` is not in `[0, count())`.
    /// - [`StoreError::Storage`]: the cart could not be persisted.
    pub fn remove_item(&mut self, index: usize) -> Result<String, StoreError> {
        let removed = self.mutate(|cart| cart.remove(index))?;

        debug!(name = %removed.name(), index, count = self.cart.len(), "removed item from cart");

        Ok(removed.name().to_string())
    }

    /// Empty the cart and drop any applied promo code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the empty cart could not be persisted.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.mutate(|cart| {
            cart.clear();
            Ok(())
        })?;

        self.promo = None;

        debug!("cleared cart");

        Ok(())
    }

    /// Validate and apply a promo code, returning the discounted summary.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::UnknownPromoCode`] for empty or unrecognised input; the
    /// previously applied promo, if any, stays in place.
    pub fn apply_promo(&mut self, code: &str) -> Result<PriceSummary, StoreError> {
        self.apply_promo_code(code.parse()?)
    }

    /// Apply an already parsed promo code, returning the discounted summary.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Pricing`] if summary arithmetic overflowed; the previously applied
    /// promo, if any, stays in place.
    pub fn apply_promo_code(&mut self, promo: PromoCode) -> Result<PriceSummary, StoreError> {
        let summary = summarize(&self.cart, &self.config.tax_rate, Some(promo))?;

        self.promo = Some(promo);

        debug!(%promo, "applied promo code");

        Ok(summary)
    }

    /// Drop the applied promo code.
    pub fn clear_promo(&mut self) {
        self.promo = None;
    }

    /// Promo code currently applied.
    pub fn applied_promo(&self) -> Option<PromoCode> {
        self.promo
    }

    /// Summarise the cart with an explicit promo input, ignoring the applied promo.
    ///
    /// Blank input means no promo.
    ///
    /// # Errors
    ///
    /// - [`PromoError::UnknownPromoCode`]: `promo` is non-blank and not recognised.
    /// - [`StoreError::Pricing`]: summary arithmetic overflowed.
    pub fn summarize(&self, promo: Option<&str>) -> Result<PriceSummary, StoreError> {
        let promo = PromoCode::parse_optional(promo)?;

        Ok(summarize(&self.cart, &self.config.tax_rate, promo)?)
    }

    /// Summarise the cart with the applied promo code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Pricing`] if summary arithmetic overflowed.
    pub fn summary(&self) -> Result<PriceSummary, StoreError> {
        Ok(summarize(&self.cart, &self.config.tax_rate, self.promo)?)
    }

    /// Start checkout, returning the summary to charge.
    ///
    /// Checkout does not empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyCart`] if there is nothing to check out.
    pub fn checkout(&self) -> Result<PriceSummary, StoreError> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let summary = self.summary()?;

        debug!(items = summary.item_count(), total = %summary.total(), "checkout started");

        Ok(summary)
    }

    /// Number of items in the cart.
    pub fn count(&self) -> usize {
        self.cart.len()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// The cart itself.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Store settings.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Close the store, handing back its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Apply `change` to the cart and persist the result, restoring the previous cart if
    /// persisting fails.
    fn mutate<T>(
        &mut self,
        change: impl FnOnce(&mut Cart) -> Result<T, CartError>,
    ) -> Result<T, StoreError> {
        let previous = self.cart.clone();
        let value = change(&mut self.cart)?;

        if let Err(err) = self.persist() {
            error!(key = %self.config.storage_key, error = %err, "failed to persist cart; rolling back");
            self.cart = previous;

            return Err(err);
        }

        Ok(value)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = encode_cart(&self.cart)?;

        self.storage.save(&self.config.storage_key, &json)?;

        Ok(())
    }
}
