//! Display models for the presentation layer.
//!
//! Everything here is pre-formatted text; renderers print fields as-is.

use groovy_core::ProductRef;
use serde::Serialize;

use crate::cart::{CartLedger, LineItem};
use crate::checkout::CheckoutSummary;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub sku: String,
    pub title: String,
    pub size: String,
    pub style: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub installments: Option<String>,
    pub item_count: u64,
    pub open: bool,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&CartLedger> for CartView {
    fn from(cart: &CartLedger) -> Self {
        let summary = CheckoutSummary::from_ledger(cart);
        Self {
            items: cart.lines().map(CartItemView::from).collect(),
            subtotal: summary.subtotal.display(),
            installments: summary.installment_text(),
            item_count: summary.item_count,
            open: cart.is_visible(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            sku: line.product.sku.to_string(),
            title: line.product.title.clone(),
            size: line.size.to_string(),
            style: if line.product.style.is_empty() {
                None
            } else {
                Some(line.product.style.clone())
            },
            quantity: line.quantity(),
            price: format_amount(&line.product, line.product.unit_price().amount),
            line_price: format_amount(&line.product, line.line_total().amount),
        }
    }
}

/// Product listing card display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCardView {
    pub sku: String,
    pub title: String,
    pub currency: String,
    pub price_integer: String,
    pub price_fraction: String,
    /// e.g. "or 9 x $ 1.21"
    pub installments: Option<String>,
    pub free_shipping: bool,
    pub sizes: Vec<String>,
}

impl From<&ProductRef> for ProductCardView {
    fn from(product: &ProductRef) -> Self {
        let (price_integer, price_fraction) = product.unit_price().split_parts();
        Self {
            sku: product.sku.to_string(),
            title: product.title.clone(),
            currency: product.currency_format.clone(),
            price_integer,
            price_fraction,
            installments: product.installment_price().map(|share| {
                format!(
                    "or {} x {}",
                    product.installments,
                    format_amount(product, share.amount)
                )
            }),
            free_shipping: product.is_free_shipping,
            sizes: product
                .available_sizes
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Format an amount with the product's own currency label.
fn format_amount(product: &ProductRef, amount: rust_decimal::Decimal) -> String {
    format!("{} {:.2}", product.currency_format, amount.round_dp(2))
}
