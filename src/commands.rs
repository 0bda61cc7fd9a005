//! Cart commands
//!
//! Intents emitted by the catalog and cart views. [`CartStore::dispatch`] carries a command
//! out and resolves every outcome, including failures, into a [`Notice`].

use rusty_money::{Money, iso::Currency};
use tracing::{error, info};

use crate::{
    cart::CartError,
    notices::Notice,
    promotions::PromoCode,
    store::{CartStore, StoreError},
    storage::Storage,
};

/// A shopper intent directed at the cart store.
#[derive(Clone, Debug, PartialEq)]
pub enum CartCommand {
    /// Add a catalog entry to the cart.
    AddItem {
        /// Item name
        name: String,
        /// Item price
        price: Money<'static, Currency>,
    },

    /// Remove the item at a cart position.
    RemoveItem {
        /// Position in the cart
        index: usize,
    },

    /// Apply a promo code typed by the shopper.
    ApplyPromo {
        /// Raw promo input
        code: String,
    },

    /// Start checkout.
    Checkout,
}

impl<S: Storage> CartStore<S> {
    /// Carry out a command and describe the outcome for the shopper.
    pub fn dispatch(&mut self, command: CartCommand) -> Notice {
        match command {
            CartCommand::AddItem { name, price } => match self.add_item(&name, price) {
                Ok(_count) => Notice::Added(name.trim().to_string()),
                Err(StoreError::Cart(CartError::DuplicateItem(name))) => {
                    Notice::AlreadyInCart(name)
                }
                Err(err) => failed(&err),
            },
            CartCommand::RemoveItem { index } => match self.remove_item(index) {
                Ok(name) => Notice::Removed(name),
                Err(err) => failed(&err),
            },
            CartCommand::ApplyPromo { code } => match code.parse::<PromoCode>() {
                Ok(promo) => match self.apply_promo_code(promo) {
                    Ok(_summary) => Notice::PromoApplied(promo),
                    Err(err) => failed(&err),
                },
                Err(err) if err.is_empty_input() => Notice::PromoMissing,
                Err(_) => Notice::PromoInvalid,
            },
            CartCommand::Checkout => match self.checkout() {
                Ok(summary) => {
                    info!(items = summary.item_count(), total = %summary.total(), "processing order");
                    Notice::CheckoutStarted
                }
                Err(StoreError::EmptyCart) => Notice::CartEmpty,
                Err(err) => failed(&err),
            },
        }
    }
}

fn failed(err: &StoreError) -> Notice {
    error!(error = %err, "cart command failed");

    Notice::Failed(err.to_string())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{config::StoreConfig, storage::MemoryStorage};

    use super::*;

    fn add(name: &str, minor: i64) -> CartCommand {
        CartCommand::AddItem {
            name: name.to_string(),
            price: Money::from_minor(minor, USD),
        }
    }

    fn promo(code: &str) -> CartCommand {
        CartCommand::ApplyPromo {
            code: code.to_string(),
        }
    }

    fn open() -> Result<CartStore<MemoryStorage>, StoreError> {
        CartStore::open(MemoryStorage::new(), StoreConfig::default())
    }

    #[test]
    fn add_and_duplicate_add() -> TestResult {
        let mut store = open()?;

        assert_eq!(
            store.dispatch(add("Game A", 5999)),
            Notice::Added("Game A".to_string())
        );
        assert_eq!(
            store.dispatch(add("Game A", 5999)),
            Notice::AlreadyInCart("Game A".to_string())
        );
        assert_eq!(store.count(), 1);

        Ok(())
    }

    #[test]
    fn invalid_add_fails() -> TestResult {
        let mut store = open()?;

        assert!(matches!(store.dispatch(add("  ", 100)), Notice::Failed(_)));
        assert!(matches!(store.dispatch(add("Refund", -100)), Notice::Failed(_)));
        assert_eq!(store.count(), 0);

        Ok(())
    }

    #[test]
    fn remove_reports_name() -> TestResult {
        let mut store = open()?;
        store.dispatch(add("Game A", 5999));

        assert_eq!(
            store.dispatch(CartCommand::RemoveItem { index: 0 }),
            Notice::Removed("Game A".to_string())
        );

        Ok(())
    }

    #[test]
    fn remove_out_of_range_fails() -> TestResult {
        let mut store = open()?;

        assert!(matches!(
            store.dispatch(CartCommand::RemoveItem { index: 0 }),
            Notice::Failed(_)
        ));

        Ok(())
    }

    #[test]
    fn promo_notices() -> TestResult {
        let mut store = open()?;

        assert_eq!(
            store.dispatch(promo("save10")),
            Notice::PromoApplied(PromoCode::Save10)
        );
        assert_eq!(store.dispatch(promo("  ")), Notice::PromoMissing);
        assert_eq!(store.dispatch(promo("SAVE99")), Notice::PromoInvalid);
        assert_eq!(store.applied_promo(), Some(PromoCode::Save10));

        Ok(())
    }

    #[test]
    fn promo_notice_names_the_applied_code() -> TestResult {
        let mut store = open()?;
        store.dispatch(add("Game A", 5999));

        assert_eq!(
            store.dispatch(promo(" game20 ")),
            Notice::PromoApplied(PromoCode::Game20)
        );
        assert_eq!(store.summary()?.promo(), Some(PromoCode::Game20));

        Ok(())
    }

    #[test]
    fn checkout_notices() -> TestResult {
        let mut store = open()?;

        assert_eq!(store.dispatch(CartCommand::Checkout), Notice::CartEmpty);

        store.dispatch(add("Game A", 5999));

        assert_eq!(store.dispatch(CartCommand::Checkout), Notice::CheckoutStarted);

        Ok(())
    }
}
