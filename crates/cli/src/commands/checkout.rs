//! Checkout command.

use std::fmt::Write as _;

use groovy_storefront::checkout::{self, CheckoutSummary};
use groovy_storefront::error::AppError;
use groovy_storefront::state::AppState;

/// Preview checkout, or confirm it when `confirmed` is set.
///
/// Previewing is the "cancel" path: the cart is left untouched.
///
/// # Errors
///
/// Returns an error if the cart is empty.
pub fn run(state: &mut AppState, confirmed: bool) -> Result<(), AppError> {
    let rendered = if confirmed {
        let receipt = checkout::confirm(state)?;
        format!("{}\n", receipt.message())
    } else {
        if state.cart().is_empty() {
            return Err(AppError::BadRequest("cart is empty".to_string()));
        }
        preview(&CheckoutSummary::from_ledger(state.cart()))
    };

    #[allow(clippy::print_stdout)]
    {
        print!("{rendered}");
    }
    Ok(())
}

/// Confirmation prompt shown before the shopper commits.
fn preview(summary: &CheckoutSummary) -> String {
    let mut out = format!("{}\n", summary.prompt());
    if let Some(installments) = summary.installment_text() {
        let _ = writeln!(out, "{installments}");
    }
    out.push_str("Re-run with --yes to confirm\n");
    out
}
