//! Cart Example
//!
//! Drives a cart stored on disk, the way the storefront pages drive it in the browser.
//!
//! Use `catalog` to list products, `add <key>` to add one, `remove <position>`, `promo <code>`,
//! `checkout` and `clear` to act on the cart. With no command the receipt is printed.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tally::{
    catalog::Catalog,
    commands::CartCommand,
    config::StoreConfig,
    notices::Notice,
    receipt::Receipt,
    storage::FileStorage,
    store::CartStore,
    utils::{ExampleCartArgs, ExampleCartCommand, LogFormat},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Cart Example
pub fn main() -> Result<()> {
    let args = ExampleCartArgs::parse();

    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };

    let catalog = Catalog::load(&args.catalog)?;
    let mut store = CartStore::open(FileStorage::new(&args.storage_dir), config)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let command = match args.command {
        Some(ExampleCartCommand::Catalog) => {
            for product in catalog.iter() {
                writeln!(handle, "{:<16} {:<24} {}", product.key, product.name, product.price)?;
            }

            return Ok(());
        }
        Some(ExampleCartCommand::Add { key }) => Some(catalog.add_command(&key)?),
        Some(ExampleCartCommand::Remove { position }) => Some(CartCommand::RemoveItem {
            index: position.get() - 1,
        }),
        Some(ExampleCartCommand::Promo { code }) => Some(CartCommand::ApplyPromo { code }),
        Some(ExampleCartCommand::Checkout) => Some(CartCommand::Checkout),
        Some(ExampleCartCommand::Clear) => {
            store.clear()?;
            None
        }
        Some(ExampleCartCommand::Show) | None => None,
    };

    if let Some(command) = command {
        let notice = store.dispatch(command);
        writeln!(handle, "{notice}")?;

        if matches!(notice, Notice::CheckoutStarted) {
            writeln!(
                handle,
                "Thank you for your order! This is a demo - no payment will be processed."
            )?;
        }
    }

    Receipt::from_store(&store)?.write_to(&mut handle)?;

    Ok(())
}

fn init_logging(args: &ExampleCartArgs) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    match args.log_format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}
