//! Store configuration

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::{Currency, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    prices::{PriceError, currency_from_code},
    storage::is_valid_key,
};

/// Storage key the storefront has always used for the cart.
pub const DEFAULT_STORAGE_KEY: &str = "gameHubCart";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error(transparent)]
    Currency(#[from] PriceError),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Storage key is blank
    #[error("Storage key must not be empty")]
    EmptyStorageKey,

    /// Storage key has characters storage backends cannot hold
    #[error("Storage key {0:?} may only contain ASCII letters, digits, '-' and '_'")]
    InvalidStorageKey(String),
}

/// Cart store settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Key the cart is stored under.
    pub storage_key: String,

    /// Currency every price is in.
    pub currency: &'static Currency,

    /// Tax charged on the subtotal.
    pub tax_rate: Percentage,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: USD,
            tax_rate: Percentage::from(Decimal::new(9, 2)),
        }
    }
}

/// Config as written in YAML. Missing fields take the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfigFile {
    /// Storage key (e.g., "gameHubCart")
    pub storage_key: Option<String>,

    /// Currency code (e.g., "USD")
    pub currency: Option<String>,

    /// Tax rate (e.g., "9%" or "0.09")
    pub tax_rate: Option<String>,
}

impl TryFrom<StoreConfigFile> for StoreConfig {
    type Error = ConfigError;

    fn try_from(file: StoreConfigFile) -> Result<Self, Self::Error> {
        let mut config = StoreConfig::default();

        if let Some(storage_key) = file.storage_key {
            config = config.with_storage_key(storage_key)?;
        }

        if let Some(currency) = file.currency {
            config.currency = currency_from_code(&currency)?;
        }

        if let Some(tax_rate) = file.tax_rate {
            config.tax_rate = parse_percentage(&tax_rate)?;
        }

        Ok(config)
    }
}

impl StoreConfig {
    /// Replace the storage key.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyStorageKey`]: the key is blank.
    /// - [`ConfigError::InvalidStorageKey`]: the key is not ASCII letters, digits, `-` or `_`.
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Result<Self, ConfigError> {
        let storage_key = storage_key.into();

        if storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }

        if !is_valid_key(&storage_key) {
            return Err(ConfigError::InvalidStorageKey(storage_key));
        }

        self.storage_key = storage_key;

        Ok(self)
    }

    /// Parse config from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or a value cannot be parsed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: StoreConfigFile = serde_norway::from_str(yaml)?;

        file.try_into()
    }

    /// Load config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }
}

/// Parse percentage string (e.g., "9%" or "0.09") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "9%" for 9%
/// - Decimal format: "0.09" for 9%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or the value is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map(|points| points / Decimal::new(100, 0))
    } else {
        trimmed.parse::<Decimal>()
    }
    .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?;

    if value < Decimal::ZERO {
        return Err(ConfigError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn fraction(percentage: Percentage) -> Decimal {
        percentage * Decimal::ONE
    }

    #[test]
    fn default_matches_storefront() {
        let config = StoreConfig::default();

        assert_eq!(config.storage_key, "gameHubCart");
        assert_eq!(config.currency, USD);
        assert_eq!(fraction(config.tax_rate), Decimal::new(9, 2));
    }

    #[test]
    fn from_yaml_str_overrides_fields() -> TestResult {
        let yaml = r#"
storage_key: testCart
currency: GBP
tax_rate: "20%"
"#;

        let config = StoreConfig::from_yaml_str(yaml)?;

        assert_eq!(config.storage_key, "testCart");
        assert_eq!(config.currency, GBP);
        assert_eq!(fraction(config.tax_rate), Decimal::new(20, 2));

        Ok(())
    }

    #[test]
    fn from_yaml_str_fills_missing_fields_with_defaults() -> TestResult {
        let config = StoreConfig::from_yaml_str("currency: EUR\n")?;

        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(fraction(config.tax_rate), Decimal::new(9, 2));

        Ok(())
    }

    #[test]
    fn from_yaml_str_rejects_unknown_fields() {
        let result = StoreConfig::from_yaml_str("shipping: free\n");

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn from_yaml_str_rejects_unknown_currency() {
        let result = StoreConfig::from_yaml_str("currency: XYZ\n");

        assert!(matches!(
            result,
            Err(ConfigError::Currency(PriceError::UnknownCurrency(_)))
        ));
    }

    #[test]
    fn with_storage_key_rejects_blank_keys() {
        let result = StoreConfig::default().with_storage_key("  ");

        assert!(matches!(result, Err(ConfigError::EmptyStorageKey)));
    }

    #[test]
    fn with_storage_key_rejects_keys_storage_cannot_hold() {
        for key in ["game hub", "../cart", "cart.json", "ca/rt"] {
            assert!(
                matches!(
                    StoreConfig::default().with_storage_key(key),
                    Err(ConfigError::InvalidStorageKey(rejected)) if rejected == key
                ),
                "expected {key:?} to be rejected"
            );
        }
    }

    #[test]
    fn from_yaml_str_rejects_invalid_storage_key() {
        let result = StoreConfig::from_yaml_str("storage_key: \"game hub\"\n");

        assert!(matches!(result, Err(ConfigError::InvalidStorageKey(_))));
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("store.yml");
        std::fs::write(&path, "tax_rate: \"0.05\"\n")?;

        let config = StoreConfig::load(&path)?;

        assert_eq!(fraction(config.tax_rate), Decimal::new(5, 2));

        Ok(())
    }

    #[test]
    fn parse_percentage_accepts_both_formats() -> TestResult {
        assert_eq!(fraction(parse_percentage("9%")?), Decimal::new(9, 2));
        assert_eq!(fraction(parse_percentage(" 0.09 ")?), Decimal::new(9, 2));
        assert_eq!(fraction(parse_percentage("12.5 %")?), Decimal::new(125, 3));

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_garbage_and_negatives() {
        assert!(matches!(
            parse_percentage("nine"),
            Err(ConfigError::InvalidPercentage(_))
        ));
        assert!(matches!(
            parse_percentage("-5%"),
            Err(ConfigError::InvalidPercentage(_))
        ));
    }
}
