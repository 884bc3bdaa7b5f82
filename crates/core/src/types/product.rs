//! Product reference handed from the catalog to the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyCode, Price, ProductId, SizeLabel, Sku};

/// A catalog product as the cart sees it.
///
/// The cart stores a copy of this value per line, so a line keeps rendering
/// even if the product later disappears from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: ProductId,
    pub sku: Sku,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub style: String,
    /// Unit price in `currency_id`'s standard unit.
    pub price: Decimal,
    /// Number of equal installments the price can be split into (0 = not offered).
    #[serde(default)]
    pub installments: u32,
    #[serde(default)]
    pub currency_id: CurrencyCode,
    /// Currency label shown next to amounts (e.g. `$`).
    pub currency_format: String,
    #[serde(default)]
    pub is_free_shipping: bool,
    pub available_sizes: Vec<SizeLabel>,
}

impl ProductRef {
    /// Whether the product can be ordered in `size`.
    #[must_use]
    pub fn offers_size(&self, size: &SizeLabel) -> bool {
        self.available_sizes.contains(size)
    }

    /// Whether the product has any of the given sizes.
    #[must_use]
    pub fn offers_any(&self, sizes: &[SizeLabel]) -> bool {
        self.available_sizes.iter().any(|s| sizes.contains(s))
    }

    /// The unit price with its currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.price, self.currency_id)
    }

    /// Per-payment amount when the unit price is paid in installments.
    #[must_use]
    pub fn installment_price(&self) -> Option<Price> {
        self.unit_price().per_installment(self.installments)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FEED_ITEM: &str = r#"{
        "id": 0,
        "sku": 8552515751438644,
        "title": "Cat Tee Black T-Shirt",
        "description": "4 MSL",
        "availableSizes": ["S", "XS"],
        "style": "Black with custom print",
        "price": 10.9,
        "installments": 9,
        "currencyId": "USD",
        "currencyFormat": "$",
        "isFreeShipping": true
    }"#;

    #[test]
    fn test_deserialize_feed_item() {
        let product: ProductRef = serde_json::from_str(FEED_ITEM).unwrap();
        assert_eq!(product.sku, Sku::new(8_552_515_751_438_644));
        assert_eq!(product.price, Decimal::new(109, 1));
        assert_eq!(product.installments, 9);
        assert!(product.is_free_shipping);
        assert_eq!(product.available_sizes.len(), 2);
    }

    #[test]
    fn test_offers_size() {
        let product: ProductRef = serde_json::from_str(FEED_ITEM).unwrap();
        assert!(product.offers_size(&SizeLabel::parse("S").unwrap()));
        assert!(!product.offers_size(&SizeLabel::parse("XL").unwrap()));
    }

    #[test]
    fn test_offers_any() {
        let product: ProductRef = serde_json::from_str(FEED_ITEM).unwrap();
        let wanted = [SizeLabel::parse("XL").unwrap(), SizeLabel::parse("XS").unwrap()];
        assert!(product.offers_any(&wanted));
        assert!(!product.offers_any(&[]));
    }

    #[test]
    fn test_installment_price() {
        let product: ProductRef = serde_json::from_str(FEED_ITEM).unwrap();
        assert_eq!(
            product.installment_price().unwrap().amount,
            Decimal::new(121, 2)
        );
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let product: ProductRef = serde_json::from_str(
            r#"{"id":1,"sku":2,"title":"Plain","price":"5.00","currencyFormat":"$","availableSizes":[]}"#,
        )
        .unwrap();
        assert_eq!(product.installments, 0);
        assert!(!product.is_free_shipping);
        assert_eq!(product.currency_id, CurrencyCode::USD);
        assert!(product.installment_price().is_none());
    }
}
