//! Tally
//!
//! Tally is a storefront cart engine: an ordered cart of uniquely named line items, persisted
//! to key/value storage after every change, with tax and promo-code pricing derived on demand.

pub mod cart;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod discounts;
pub mod items;
pub mod notices;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod promotions;
pub mod receipt;
pub mod records;
pub mod storage;
pub mod store;
pub mod utils;
