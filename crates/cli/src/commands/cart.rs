//! Cart commands.

use std::fmt::Write as _;

use groovy_core::{SizeLabel, Sku};
use groovy_storefront::cart::Outcome;
use groovy_storefront::error::AppError;
use groovy_storefront::state::AppState;
use groovy_storefront::view::CartView;
use tracing::{info, warn};

use super::with_retries;

/// Print cart lines and totals.
pub fn show(state: &AppState) {
    let rendered = render(&CartView::from(state.cart()));

    #[allow(clippy::print_stdout)]
    {
        print!("{rendered}");
    }
}

/// Render the cart panel as text.
fn render(view: &CartView) -> String {
    if view.items.is_empty() {
        return "Your cart is empty, add some products first\n".to_string();
    }

    let mut out = format!(
        "Cart ({} items, {})\n",
        view.item_count,
        if view.open { "open" } else { "closed" }
    );
    for item in &view.items {
        let style = item
            .style
            .as_deref()
            .map(|s| format!(" | {s}"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {} {} | {}{} | {} x {} = {}",
            item.sku, item.title, item.size, style, item.quantity, item.price, item.line_price
        );
    }
    let _ = writeln!(out, "Subtotal: {}", view.subtotal);
    if let Some(installments) = &view.installments {
        let _ = writeln!(out, "          {installments}");
    }
    out
}

pub fn set_visibility(state: &mut AppState, open: bool) {
    state.set_visibility(open);
    info!("Cart {}", if open { "opened" } else { "closed" });
}

/// Look up a product and add it to the cart.
///
/// # Errors
///
/// Returns an error if the product does not exist, is not offered in `size`,
/// `quantity` is 0, or the catalog is still unavailable after `retries`.
pub async fn add(
    state: &mut AppState,
    sku: Sku,
    size: SizeLabel,
    quantity: u32,
    retries: u32,
) -> Result<(), AppError> {
    let catalog = state.catalog();
    let product = with_retries(retries, move || async move {
        catalog.find(sku).await.map_err(AppError::from)
    })
    .await?;

    state.add_product(&product, size.clone(), quantity)?;
    info!("Added \"{} - {size}\" to the cart", product.title);
    report_quantity(state, sku, &size);
    Ok(())
}

pub fn increase(state: &mut AppState, sku: Sku, size: &SizeLabel, by: u32) {
    let outcome = state.increase(sku, size, by);
    report(state, outcome, sku, size);
}

pub fn decrease(state: &mut AppState, sku: Sku, size: &SizeLabel, by: u32) {
    let outcome = state.decrease(sku, size, by);
    report(state, outcome, sku, size);
}

/// Overwrite a line's quantity.
///
/// # Errors
///
/// Returns an error if `quantity` is 0.
pub fn set_quantity(
    state: &mut AppState,
    sku: Sku,
    size: &SizeLabel,
    quantity: u32,
) -> Result<(), AppError> {
    let outcome = state.set_quantity(sku, size, quantity)?;
    report(state, outcome, sku, size);
    Ok(())
}

pub fn remove(state: &mut AppState, sku: Sku, size: &SizeLabel) {
    match state.remove_product(sku, size) {
        Outcome::Applied => info!("Removed {sku} / {size} from the cart"),
        Outcome::NotFound => warn!("No {sku} / {size} line in the cart"),
    }
}

fn report(state: &AppState, outcome: Outcome, sku: Sku, size: &SizeLabel) {
    match outcome {
        Outcome::Applied => report_quantity(state, sku, size),
        Outcome::NotFound => warn!("No {sku} / {size} line in the cart"),
    }
}

fn report_quantity(state: &AppState, sku: Sku, size: &SizeLabel) {
    if let Some(line) = state.cart().line(sku, size) {
        info!(
            "{} - {size}: quantity {} (cart total {})",
            line.product.title,
            line.quantity(),
            state.cart().total_item_count()
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use groovy_core::{CurrencyCode, ProductId, ProductRef};
    use groovy_storefront::cart::CartLedger;
    use rust_decimal::Decimal;

    use super::*;

    fn tee() -> ProductRef {
        ProductRef {
            id: ProductId::new(7),
            sku: Sku::new(7),
            title: "Cat Tee".to_string(),
            description: String::new(),
            style: "Black".to_string(),
            price: Decimal::new(1090, 2),
            installments: 3,
            currency_id: CurrencyCode::USD,
            currency_format: "$".to_string(),
            is_free_shipping: true,
            available_sizes: vec![SizeLabel::parse("S").unwrap()],
        }
    }

    #[test]
    fn test_render_empty_cart() {
        let view = CartView::from(&CartLedger::new());
        assert_eq!(render(&view), "Your cart is empty, add some products first\n");
    }

    #[test]
    fn test_render_lines_and_totals() {
        let mut cart = CartLedger::new();
        cart.add_product(&tee(), SizeLabel::parse("S").unwrap(), 2)
            .unwrap();
        cart.show();

        let rendered = render(&CartView::from(&cart));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Cart (2 items, open)");
        assert!(lines[1].contains("Cat Tee | S | Black | 2 x"));
        assert_eq!(lines[2], "Subtotal: $ 21.80");
        assert!(lines[3].contains("or up to 3 x $ 7.27"));
    }
}
