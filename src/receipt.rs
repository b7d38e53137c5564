//! Receipt

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{cart::Cart, items::LineItem};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write receipt")]
    IO,
}

/// Renders line items as a table: position, name, quantity, unit price and subtotal.
pub fn render_lines(items: &[LineItem<'_>]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["", "Producto", "Cantidad", "Precio unitario", "Subtotal"]);

    for (position, item) in items.iter().enumerate() {
        builder.push_record([
            format!("#{}", position + 1),
            item.name().to_string(),
            item.quantity().to_string(),
            item.unit_price().to_string(),
            item.subtotal().to_string(),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Columns::new(2..5), Alignment::right());

    table.to_string()
}

/// Writes the cart lines followed by the unit count and total.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), ReceiptError> {
    writeln!(out, "\n{}", render_lines(cart.items())).map_err(|_err| ReceiptError::IO)?;
    writeln!(out, "Unidades: {}", cart.item_count()).map_err(|_err| ReceiptError::IO)?;
    writeln!(out, "Total: {}", cart.total()).map_err(|_err| ReceiptError::IO)?;

    Ok(())
}
