//! Cart ledger: the line items a shopper has picked, keyed by SKU and size.
//!
//! Lines live in one flat map keyed by [`LineKey`], so a (SKU, size) pair can
//! never hold two lines. Adding an existing pair folds into its quantity.
//!
//! Mutations on a missing line are no-ops that report [`Outcome::NotFound`]
//! instead of failing; the presentation layer ignores the outcome and tests
//! assert on it.

use std::collections::BTreeMap;

use groovy_core::{CurrencyCode, Price, ProductRef, SizeLabel, Sku};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised by cart mutations that carry caller-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product is not sold in the requested size.
    #[error("{title} is not available in size {size}")]
    SizeUnavailable { title: String, size: SizeLabel },

    /// A line quantity must be at least 1.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// Result of a mutation addressed at a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The ledger changed (or was asked for a zero delta on an existing line).
    Applied,
    /// No line exists for the given SKU and size; nothing happened.
    NotFound,
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub sku: Sku,
    pub size: SizeLabel,
}

impl LineKey {
    #[must_use]
    pub const fn new(sku: Sku, size: SizeLabel) -> Self {
        Self { sku, size }
    }
}

/// One (product, size) entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: ProductRef,
    pub size: SizeLabel,
    quantity: u32,
}

impl LineItem {
    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.sku, self.size.clone())
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.unit_price().times(self.quantity)
    }
}

/// Serialized form: a flat list of lines plus the visibility flag.
#[derive(Serialize, Deserialize)]
struct LedgerRepr {
    #[serde(default)]
    visible: bool,
    #[serde(default)]
    lines: Vec<LineItem>,
}

/// The shopper's cart.
///
/// Constructed explicitly and owned by the application context; there is no
/// global instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerRepr", into = "LedgerRepr")]
pub struct CartLedger {
    lines: BTreeMap<LineKey, LineItem>,
    visible: bool,
}

impl CartLedger {
    /// An empty, hidden cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `product` in `size`.
    ///
    /// Folds into the existing line for the same SKU and size when there is one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::SizeUnavailable`] when the product does not list
    /// `size`, and [`CartError::ZeroQuantity`] when `quantity` is 0.
    pub fn add_product(
        &mut self,
        product: &ProductRef,
        size: SizeLabel,
        quantity: u32,
    ) -> Result<Outcome, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if !product.offers_size(&size) {
            return Err(CartError::SizeUnavailable {
                title: product.title.clone(),
                size,
            });
        }

        let key = LineKey::new(product.sku, size);
        if self.lines.contains_key(&key) {
            return Ok(self.increase(key.sku, &key.size, quantity));
        }

        debug!(sku = %key.sku, size = %key.size, quantity, "new cart line");
        let line = LineItem {
            product: product.clone(),
            size: key.size.clone(),
            quantity,
        };
        self.lines.insert(key, line);
        Ok(Outcome::Applied)
    }

    /// Raise a line's quantity by `delta`. No upper bound short of `u32::MAX`.
    pub fn increase(&mut self, sku: Sku, size: &SizeLabel, delta: u32) -> Outcome {
        self.update(sku, size, |q| q.saturating_add(delta))
    }

    /// Lower a line's quantity by `delta`, never below 1.
    ///
    /// A decrease never removes the line; use [`Self::remove_product`].
    pub fn decrease(&mut self, sku: Sku, size: &SizeLabel, delta: u32) -> Outcome {
        self.update(sku, size, |q| q.saturating_sub(delta).max(1))
    }

    /// Overwrite a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] when `quantity` is 0.
    pub fn set_quantity(
        &mut self,
        sku: Sku,
        size: &SizeLabel,
        quantity: u32,
    ) -> Result<Outcome, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        Ok(self.update(sku, size, |_| quantity))
    }

    /// Delete the line for `sku` and `size`.
    pub fn remove_product(&mut self, sku: Sku, size: &SizeLabel) -> Outcome {
        match self.lines.remove(&LineKey::new(sku, size.clone())) {
            Some(_) => {
                debug!(%sku, %size, "cart line removed");
                Outcome::Applied
            }
            None => Outcome::NotFound,
        }
    }

    /// Drop every line. Visibility is left as is.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    /// Open or close the cart panel.
    pub const fn set_visibility(&mut self, open: bool) {
        self.visible = open;
    }

    /// Open the cart panel.
    pub const fn show(&mut self) {
        self.set_visibility(true);
    }

    fn update(&mut self, sku: Sku, size: &SizeLabel, f: impl FnOnce(u32) -> u32) -> Outcome {
        let Some(line) = self.lines.get_mut(&LineKey::new(sku, size.clone())) else {
            return Outcome::NotFound;
        };
        line.quantity = f(line.quantity);
        debug!(%sku, %size, quantity = line.quantity, "cart line updated");
        Outcome::Applied
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Look up a single line.
    #[must_use]
    pub fn line(&self, sku: Sku, size: &SizeLabel) -> Option<&LineItem> {
        self.lines.get(&LineKey::new(sku, size.clone()))
    }

    /// All lines, ordered by SKU then size.
    pub fn lines(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.values()
    }

    /// Lines grouped by SKU, for rendering one block per product.
    #[must_use]
    pub fn grouped(&self) -> BTreeMap<Sku, Vec<&LineItem>> {
        let mut groups: BTreeMap<Sku, Vec<&LineItem>> = BTreeMap::new();
        for (key, line) in &self.lines {
            groups.entry(key.sku).or_default().push(line);
        }
        groups
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sum of quantities across all lines; 0 for an empty cart.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines.values().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of unit price times quantity across all lines.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .values()
            .map(|l| l.line_total().amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// [`Self::subtotal`] in the currency of the first line (USD when empty).
    #[must_use]
    pub fn subtotal_price(&self) -> Price {
        let currency = self
            .lines
            .values()
            .next()
            .map_or(CurrencyCode::default(), |l| l.product.currency_id);
        Price::new(self.subtotal(), currency)
    }

    /// Largest installment count offered by any product in the cart.
    ///
    /// 0 for an empty cart or when no product offers installments.
    #[must_use]
    pub fn max_installments(&self) -> u32 {
        self.lines
            .values()
            .map(|l| l.product.installments)
            .max()
            .unwrap_or(0)
    }
}

impl TryFrom<LedgerRepr> for CartLedger {
    type Error = CartError;

    fn try_from(repr: LedgerRepr) -> Result<Self, Self::Error> {
        let mut lines: BTreeMap<LineKey, LineItem> = BTreeMap::new();
        for line in repr.lines {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity);
            }
            // Hand-edited state may repeat a pair; fold it like add_product would.
            let quantity = line.quantity;
            lines
                .entry(line.key())
                .and_modify(|existing| existing.quantity = existing.quantity.saturating_add(quantity))
                .or_insert(line);
        }
        Ok(Self {
            lines,
            visible: repr.visible,
        })
    }
}

impl From<CartLedger> for LedgerRepr {
    fn from(ledger: CartLedger) -> Self {
        Self {
            visible: ledger.visible,
            lines: ledger.lines.into_values().collect(),
        }
    }
}
