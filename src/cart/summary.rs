//! Terminal rendering of a cart.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::cart::models::{Cart, CartItem};

/// Write `cart` as a table followed by its totals.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty");
    }

    let mut builder = Builder::default();

    builder.push_record([
        "ID".to_string(),
        "Product".to_string(),
        "Price".to_string(),
        "Amount".to_string(),
        "Subtotal".to_string(),
    ]);

    for item in cart {
        builder.push_record(item_row(item));
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "Items: {}", cart.total_quantity())?;

    if let Some(total) = cart_total(cart) {
        writeln!(out, "Total: {total:.2}")?;
    }

    Ok(())
}

fn item_row(item: &CartItem) -> [String; 5] {
    let price = item.price();

    [
        item.id.to_string(),
        item.name().unwrap_or("-").to_string(),
        price.map_or_else(|| "-".to_string(), |price| format!("{price:.2}")),
        item.amount.to_string(),
        price.map_or_else(
            || "-".to_string(),
            |price| format!("{:.2}", price * f64::from(item.amount)),
        ),
    ]
}

/// Sum of line subtotals; `None` when any line lacks a numeric price.
fn cart_total(cart: &Cart) -> Option<f64> {
    cart.iter()
        .map(|item| item.price().map(|price| price * f64::from(item.amount)))
        .sum()
}
