//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError, Product, ProductKey},
    commands::CartCommand,
    config::{ConfigError, StoreConfig},
    items::{ItemError, LineItem},
    notices::Notice,
    prices::{PriceError, parse_price},
    pricing::{PriceSummary, PricingError},
    promotions::{PromoCode, PromoError},
    receipt::{Receipt, ReceiptError},
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
    store::{CartStore, StoreError},
};
