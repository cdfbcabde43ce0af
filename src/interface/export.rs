use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::pricing::{line_total, unit_price_with_options};
use crate::state::Cart;

/// Write the cart's lines as CSV.
pub fn write_cart_csv<W: Write>(cart: &Cart, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "line_id",
        "restaurant",
        "item",
        "options",
        "quantity",
        "unit_price",
        "line_total",
        "note",
    ])?;

    let restaurant = cart.restaurant().map(|r| r.name.as_str()).unwrap_or("");
    for line in cart.lines() {
        wtr.write_record([
            line.id.clone(),
            restaurant.to_string(),
            line.menu_item.name.clone(),
            line.options_summary(),
            line.quantity.to_string(),
            format!(
                "{:.2}",
                unit_price_with_options(&line.menu_item, &line.selected_options)
            ),
            format!("{:.2}", line_total(line)),
            line.special_instructions.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the cart to a CSV file at `path`.
pub fn export_cart_csv(cart: &Cart, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_cart_csv(cart, file)
}
