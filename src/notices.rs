//! Notices
//!
//! User-facing acknowledgements for the outcome of each cart command.

use std::fmt;

use crate::promotions::PromoCode;

/// Outcome of a cart command, as shown to the shopper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// An item was added.
    Added(String),

    /// The item was already in the cart, nothing changed.
    AlreadyInCart(String),

    /// An item was removed.
    Removed(String),

    /// A promo code was applied.
    PromoApplied(PromoCode),

    /// The promo input was blank.
    PromoMissing,

    /// The promo input was not a known code.
    PromoInvalid,

    /// Checkout started for a non-empty cart.
    CheckoutStarted,

    /// Checkout requested with nothing in the cart.
    CartEmpty,

    /// The command could not be carried out.
    Failed(String),
}

impl Notice {
    /// Whether the command changed or accepted anything.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Notice::Added(_) | Notice::Removed(_) | Notice::PromoApplied(_) | Notice::CheckoutStarted
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Added(name) => write!(f, "{name} added to cart!"),
            Notice::AlreadyInCart(name) => write!(f, "{name} is already in your cart!"),
            Notice::Removed(name) => write!(f, "{name} removed from cart"),
            Notice::PromoApplied(promo) => write!(
                f,
                "Promo code applied! {}% discount",
                promo.percent_points()
            ),
            Notice::PromoMissing => f.write_str("Please enter a promo code"),
            Notice::PromoInvalid => write!(
                f,
                "Invalid promo code. Try {} or {}",
                PromoCode::Save10,
                PromoCode::Game20
            ),
            Notice::CheckoutStarted => f.write_str("Processing your order..."),
            Notice::CartEmpty => f.write_str("Your cart is empty!"),
            Notice::Failed(reason) => write!(f, "Something went wrong: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_storefront_copy() {
        assert_eq!(
            Notice::Added("Game A".to_string()).to_string(),
            "Game A added to cart!"
        );
        assert_eq!(
            Notice::AlreadyInCart("Game A".to_string()).to_string(),
            "Game A is already in your cart!"
        );
        assert_eq!(
            Notice::Removed("Game A".to_string()).to_string(),
            "Game A removed from cart"
        );
        assert_eq!(
            Notice::PromoApplied(PromoCode::Game20).to_string(),
            "Promo code applied! 20% discount"
        );
        assert_eq!(Notice::PromoMissing.to_string(), "Please enter a promo code");
        assert_eq!(
            Notice::PromoInvalid.to_string(),
            "Invalid promo code. Try SAVE10 or GAME20"
        );
        assert_eq!(Notice::CartEmpty.to_string(), "Your cart is empty!");
    }

    #[test]
    fn only_accepted_commands_are_successes() {
        assert!(Notice::Added("A".to_string()).is_success());
        assert!(Notice::CheckoutStarted.is_success());
        assert!(!Notice::AlreadyInCart("A".to_string()).is_success());
        assert!(!Notice::PromoInvalid.is_success());
        assert!(!Notice::Failed("disk full".to_string()).is_success());
    }
}
