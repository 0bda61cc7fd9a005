//! Utils

use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Arguments for the cart example
#[derive(Debug, Parser)]
#[command(name = "cart", about = "Drive a stored cart from the command line", long_about = None)]
pub struct ExampleCartArgs {
    /// Directory the cart is stored in
    #[arg(short, long, env = "TALLY_STORAGE_DIR", default_value = "target/tally")]
    pub storage_dir: PathBuf,

    /// Store config YAML file
    #[arg(short, long, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog YAML file
    #[arg(long, env = "TALLY_CATALOG", default_value = "fixtures/catalog/gamehub.yml")]
    pub catalog: PathBuf,

    /// Log level filter, used when `RUST_LOG` is unset
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Action to take; prints the receipt when omitted
    #[command(subcommand)]
    pub command: Option<ExampleCartCommand>,
}

/// Actions for the cart example
#[derive(Debug, Subcommand)]
pub enum ExampleCartCommand {
    /// List catalog products
    Catalog,

    /// Add a catalog product by key
    Add {
        /// Catalog key
        key: String,
    },

    /// Remove an item by its receipt position
    Remove {
        /// Position as shown on the receipt, starting at 1
        position: NonZeroUsize,
    },

    /// Apply a promo code
    Promo {
        /// Promo code
        code: String,
    },

    /// Check out
    Checkout,

    /// Empty the cart
    Clear,

    /// Print the receipt
    Show,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_subcommands() -> TestResult {
        let args = ExampleCartArgs::try_parse_from(["cart", "--storage-dir", "carts", "remove", "2"])?;

        assert_eq!(args.storage_dir, PathBuf::from("carts"));
        assert!(matches!(
            args.command,
            Some(ExampleCartCommand::Remove { position }) if position.get() == 2
        ));

        Ok(())
    }

    #[test]
    fn remove_rejects_position_zero() {
        let result = ExampleCartArgs::try_parse_from(["cart", "remove", "0"]);

        assert!(result.is_err());
    }

    #[test]
    fn command_is_optional() -> TestResult {
        let args = ExampleCartArgs::try_parse_from(["cart"])?;

        assert!(args.command.is_none());
        assert!(matches!(args.log_format, LogFormat::Compact));

        Ok(())
    }
}
