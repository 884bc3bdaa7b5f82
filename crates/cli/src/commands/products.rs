//! Product listing.

use std::fmt::Write as _;

use groovy_core::{SizeLabel, Sort, SortOrder};
use groovy_storefront::error::AppError;
use groovy_storefront::state::AppState;
use groovy_storefront::view::ProductCardView;
use tracing::{info, warn};

use super::with_retries;

/// Update the saved filter, then list matching products.
///
/// # Arguments
///
/// * `sizes` - New size filter; `None` keeps the saved one
/// * `sort` - New price order; `None` keeps the saved one
/// * `retries` - How often to retry a failed fetch
///
/// # Errors
///
/// Returns an error if the catalog fetch still fails after all retries.
pub async fn list(
    state: &mut AppState,
    sizes: Option<Vec<SizeLabel>>,
    sort: Option<SortOrder>,
    retries: u32,
) -> Result<(), AppError> {
    if let Some(sizes) = sizes {
        warn_unknown_sizes(&sizes);
        state.change_sizes(sizes);
    }
    if let Some(order) = sort {
        state.change_sort(vec![Sort::price(order)]);
    }

    let state = &*state;
    let products = with_retries(retries, move || state.list_products()).await?;

    let filter = state.filter();
    let sizes = if filter.sizes.is_empty() {
        "all".to_string()
    } else {
        filter
            .sizes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    info!(
        "Found {} products (sizes: {sizes}, price {})",
        products.len(),
        filter.price_order()
    );

    let cards: Vec<ProductCardView> = products.iter().map(ProductCardView::from).collect();
    let rendered = render(&cards);

    #[allow(clippy::print_stdout)]
    {
        print!("{rendered}");
    }

    Ok(())
}

/// Sizes outside the standard range never match the bundled catalog.
fn warn_unknown_sizes(sizes: &[SizeLabel]) {
    let standard = SizeLabel::standard();
    for size in sizes.iter().filter(|s| !standard.contains(*s)) {
        warn!(
            "{size} is not a standard size (known: {})",
            SizeLabel::STANDARD.join(" ")
        );
    }
}

/// Render product cards as text, two lines per product.
fn render(cards: &[ProductCardView]) -> String {
    let mut out = String::new();
    for card in cards {
        let shipping = if card.free_shipping { " [free shipping]" } else { "" };
        let _ = writeln!(
            out,
            "{} | {} | {}{}.{}{}",
            card.sku, card.title, card.currency, card.price_integer, card.price_fraction, shipping
        );
        let installments = card.installments.as_deref().unwrap_or_default();
        let _ = writeln!(out, "    sizes: {}  {installments}", card.sizes.join(" "));
    }
    out
}
