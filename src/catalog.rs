//! Catalog
//!
//! Products a shopper can add to the cart, loaded from YAML:
//!
//! ```yaml
//! products:
//!   - key: cyber-odyssey
//!     name: Cyber Odyssey 2077
//!     price: 59.99 USD
//! ```

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::{
    commands::CartCommand,
    prices::{PriceError, parse_price},
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Catalog loading and lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading catalog files
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid product price
    #[error("Invalid price for product {0}: {1}")]
    InvalidPrice(String, PriceError),

    /// Two products share a key
    #[error("Duplicate product key: {0}")]
    DuplicateProduct(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Catalog key
    pub key: String,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Money<'static, Currency>,
}

impl Product {
    /// Command adding this product to the cart.
    pub fn add_command(&self) -> CartCommand {
        CartCommand::AddItem {
            name: self.name.clone(),
            price: self.price,
        }
    }
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Catalog key
    pub key: String,

    /// Product name
    pub name: String,

    /// Product price (e.g., "59.99 USD")
    pub price: String,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)
            .map_err(|err| CatalogError::InvalidPrice(fixture.key.clone(), err))?;

        Ok(Product {
            key: fixture.key,
            name: fixture.name,
            price,
        })
    }
}

/// Product catalog in display order.
#[derive(Debug, Default)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    keys: FxHashMap<String, ProductKey>,
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a YAML string
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a price is invalid, keys repeat, or
    /// products are priced in different currencies.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;
        let mut catalog = Self::new();

        for product_fixture in fixture.products {
            catalog.insert(product_fixture.try_into()?)?;
        }

        Ok(catalog)
    }

    /// Load a catalog from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Add a product to the end of the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the key is taken or the product is priced in another currency.
    pub fn insert(&mut self, product: Product) -> Result<ProductKey, CatalogError> {
        if self.keys.contains_key(&product.key) {
            return Err(CatalogError::DuplicateProduct(product.key));
        }

        let currency = product.price.currency();

        match self.currency {
            Some(existing) if existing != currency => {
                return Err(CatalogError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
            Some(_) => {}
            None => self.currency = Some(currency),
        }

        let key = product.key.clone();
        let product_key = self.products.insert(product);
        self.keys.insert(key, product_key);

        Ok(product_key)
    }

    /// Look up a product by its catalog key
    pub fn get(&self, key: &str) -> Option<&Product> {
        self.keys
            .get(key)
            .and_then(|product_key| self.products.get(*product_key))
    }

    /// Command adding the product with this key to the cart
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if there is no such product.
    pub fn add_command(&self, key: &str) -> Result<CartCommand, CatalogError> {
        self.get(key)
            .map(Product::add_command)
            .ok_or_else(|| CatalogError::ProductNotFound(key.to_string()))
    }

    /// Products in display order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Currency of the catalog, once a product is loaded
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    const YAML: &str = r"
products:
  - key: cyber-odyssey
    name: Cyber Odyssey 2077
    price: 59.99 USD
  - key: dragon-quest
    name: Dragon's Quest
    price: 39.99 USD
";

    #[test]
    fn from_yaml_str_keeps_display_order() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        let keys: Vec<&str> = catalog.iter().map(|product| product.key.as_str()).collect();

        assert_eq!(keys, ["cyber-odyssey", "dragon-quest"]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.currency(), Some(USD));

        Ok(())
    }

    #[test]
    fn get_returns_product() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        let product = catalog.get("dragon-quest");

        assert_eq!(product.map(|p| p.name.as_str()), Some("Dragon's Quest"));
        assert_eq!(product.map(|p| p.price), Some(Money::from_minor(3999, USD)));
        assert!(catalog.get("missing").is_none());

        Ok(())
    }

    #[test]
    fn add_command_carries_name_and_price() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        assert_eq!(
            catalog.add_command("cyber-odyssey")?,
            CartCommand::AddItem {
                name: "Cyber Odyssey 2077".to_string(),
                price: Money::from_minor(5999, USD),
            }
        );

        Ok(())
    }

    #[test]
    fn add_command_unknown_key_errors() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        assert!(matches!(
            catalog.add_command("nope"),
            Err(CatalogError::ProductNotFound(key)) if key == "nope"
        ));

        Ok(())
    }

    #[test]
    fn duplicate_keys_error() {
        let yaml = r"
products:
  - { key: a, name: A, price: 1.00 USD }
  - { key: a, name: B, price: 2.00 USD }
";

        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateProduct(_))
        ));
    }

    #[test]
    fn mixed_currencies_error() -> TestResult {
        let mut catalog = Catalog::new();
        catalog.insert(Product {
            key: "a".to_string(),
            name: "A".to_string(),
            price: Money::from_minor(100, USD),
        })?;

        let result = catalog.insert(Product {
            key: "b".to_string(),
            name: "B".to_string(),
            price: Money::from_minor(100, GBP),
        });

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch(..))));

        Ok(())
    }

    #[test]
    fn invalid_price_names_product() {
        let yaml = r"
products:
  - { key: a, name: A, price: lots }
";

        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::InvalidPrice(key, _)) if key == "a"
        ));
    }
}
