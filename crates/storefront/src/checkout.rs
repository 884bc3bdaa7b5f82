//! Checkout summary and confirmation.
//!
//! Checkout is a two-step flow: the shopper is shown a [`CheckoutSummary`]
//! and either confirms (the cart is cleared and a [`Receipt`] returned) or
//! cancels, in which case nothing is called and the cart stays as it was.

use chrono::{DateTime, Utc};
use groovy_core::Price;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::cart::CartLedger;
use crate::error::AppError;
use crate::state::AppState;

/// Totals shown in the cart footer and the confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub item_count: u64,
    pub subtotal: Price,
    /// Largest installment count any line offers (0 = none).
    pub installments: u32,
    /// Subtotal split over `installments`, when offered.
    pub per_installment: Option<Price>,
}

impl CheckoutSummary {
    #[must_use]
    pub fn from_ledger(cart: &CartLedger) -> Self {
        let subtotal = cart.subtotal_price();
        let installments = cart.max_installments();
        Self {
            item_count: cart.total_item_count(),
            subtotal,
            installments,
            per_installment: subtotal.per_installment(installments),
        }
    }

    /// Text for the confirmation prompt.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "{} item(s), total {}. Confirm checkout?",
            self.item_count,
            self.subtotal.display()
        )
    }

    /// Installment line for the cart footer, e.g. "or up to 9 x $ 4.84".
    #[must_use]
    pub fn installment_text(&self) -> Option<String> {
        self.per_installment
            .map(|share| format!("or up to {} x {}", self.installments, share.display()))
    }
}

/// Record of a confirmed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_ref: Uuid,
    pub placed_at: DateTime<Utc>,
    pub summary: CheckoutSummary,
}

impl Receipt {
    /// Success message shown after checkout.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Checkout complete, paid {} (order {})",
            self.summary.subtotal.display(),
            self.order_ref
        )
    }
}

/// Confirm checkout: summarize, clear the cart and persist.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] when the cart is empty; nothing changes.
pub fn confirm(state: &mut AppState) -> Result<Receipt, AppError> {
    if state.cart().is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let receipt = Receipt {
        order_ref: Uuid::new_v4(),
        placed_at: Utc::now(),
        summary: CheckoutSummary::from_ledger(state.cart()),
    };
    state.clear_cart();

    info!(
        order_ref = %receipt.order_ref,
        items = receipt.summary.item_count,
        subtotal = %receipt.summary.subtotal.amount,
        "Checkout confirmed"
    );
    Ok(receipt)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use groovy_core::{CurrencyCode, ProductId, ProductRef, SizeLabel, Sku};
    use rust_decimal::Decimal;

    use super::*;

    fn product(sku: u64, cents: i64, installments: u32) -> ProductRef {
        ProductRef {
            id: ProductId::new(sku),
            sku: Sku::new(sku),
            title: format!("Tee {sku}"),
            description: String::new(),
            style: String::new(),
            price: Decimal::new(cents, 2),
            installments,
            currency_id: CurrencyCode::USD,
            currency_format: "$".to_string(),
            is_free_shipping: false,
            available_sizes: vec![SizeLabel::parse("M").unwrap()],
        }
    }

    #[test]
    fn test_summary_of_empty_cart() {
        let summary = CheckoutSummary::from_ledger(&CartLedger::new());
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.subtotal.amount, Decimal::ZERO);
        assert_eq!(summary.installments, 0);
        assert!(summary.per_installment.is_none());
        assert!(summary.installment_text().is_none());
    }

    #[test]
    fn test_summary_splits_subtotal_over_max_installments() {
        let mut cart = CartLedger::new();
        let m = SizeLabel::parse("M").unwrap();
        cart.add_product(&product(1, 1000, 0), m.clone(), 2).unwrap();
        cart.add_product(&product(2, 2550, 6), m, 1).unwrap();

        let summary = CheckoutSummary::from_ledger(&cart);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal.amount, Decimal::new(4550, 2));
        assert_eq!(summary.installments, 6);
        assert_eq!(summary.per_installment.unwrap().amount, Decimal::new(758, 2));
        assert_eq!(summary.prompt(), "3 item(s), total $ 45.50. Confirm checkout?");
        assert_eq!(
            summary.installment_text().unwrap(),
            "or up to 6 x $ 7.58"
        );
    }
}
