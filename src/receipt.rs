//! Receipt
//!
//! Renders the cart and its price summary for the terminal.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    items::LineItem,
    pricing::PriceSummary,
    store::{CartStore, StoreError},
    storage::Storage,
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The summary could not be derived.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// A cart paired with its summary, ready to print.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    items: &'a [LineItem],
    summary: PriceSummary,
}

impl<'a> Receipt<'a> {
    /// Create a receipt for the given cart and summary.
    pub fn new(cart: &'a Cart, summary: PriceSummary) -> Self {
        Self {
            items: cart.items(),
            summary,
        }
    }

    /// Build a receipt from the store's cart and applied promo.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the summary cannot be derived.
    pub fn from_store<S: Storage>(store: &'a CartStore<S>) -> Result<Self, ReceiptError> {
        Ok(Self::new(store.cart(), store.summary()?))
    }

    /// The summary being printed.
    pub fn summary(&self) -> &PriceSummary {
        &self.summary
    }

    /// Writes the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.items.is_empty() {
            return writeln!(out, "Your cart is empty!").map_err(|_err| ReceiptError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Price"]);

        for (idx, item) in self.items.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                item.name().to_string(),
                format!("{}", item.price()),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..3), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let summary = &self.summary;

        let mut lines = vec![
            (
                format!("Subtotal ({} items):", summary.item_count()),
                format!("{}", summary.subtotal()),
            ),
            ("Tax:".to_string(), format!("{}", summary.tax())),
        ];

        if let Some(promo) = summary.promo() {
            lines.push((
                format!("Discount ({promo}):"),
                format!("-{}", summary.discount()),
            ));
        }

        lines.push(("Total:".to_string(), format!("{}", summary.total())));

        let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &lines {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")
                .map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}
