//! Price, image and stock types shared by products and variants.

use serde::{Deserialize, Serialize};

/// A monetary amount in one currency.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Money {
    /// The amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// The three-letter ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A discount applied to a price.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductDiscount {
    /// The absolute amount taken off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_off: Option<f64>,

    /// The percentage taken off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<f64>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Regular and final price at one end of a price range.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductPrice {
    /// The price before discounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<Money>,

    /// The price after discounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price: Option<Money>,

    /// The applied discount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<ProductDiscount>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The lowest and highest price of a product.
///
/// For simple products both ends are equal; configurable products span
/// their variants.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PriceRange {
    /// The lowest price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_price: Option<ProductPrice>,

    /// The highest price. Not selected by the base fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_price: Option<ProductPrice>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PriceRange {
    /// Returns the final minimum price, if selected.
    #[must_use]
    pub fn final_price(&self) -> Option<&Money> {
        self.minimum_price
            .as_ref()
            .and_then(|price| price.final_price.as_ref())
    }

    /// Returns the regular minimum price, if selected.
    #[must_use]
    pub fn regular_price(&self) -> Option<&Money> {
        self.minimum_price
            .as_ref()
            .and_then(|price| price.regular_price.as_ref())
    }

    /// Returns `true` if the final minimum price is below the regular one.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        match (
            self.final_price().and_then(|money| money.value),
            self.regular_price().and_then(|money| money.value),
        ) {
            (Some(final_price), Some(regular_price)) => final_price < regular_price,
            _ => false,
        }
    }
}

/// A product image reference.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductImage {
    /// The image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// The image label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An entry of a product's media gallery.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MediaGalleryEntry {
    /// The media URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// The media label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Sort position in the gallery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// Whether the entry is hidden on the storefront.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Stock availability of a product or variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    /// Available for purchase.
    InStock,
    /// Not available.
    OutOfStock,
    /// A status this library does not know.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_range_deserialization() {
        let range: PriceRange = serde_json::from_value(json!({
            "minimum_price": {
                "regular_price": {"value": 45.0, "currency": "USD"},
                "final_price": {"value": 34.0, "currency": "USD"},
                "discount": {"amount_off": 11.0, "percent_off": 24.44}
            }
        }))
        .unwrap();

        assert_eq!(range.final_price().unwrap().value, Some(34.0));
        assert_eq!(range.regular_price().unwrap().currency.as_deref(), Some("USD"));
        assert!(range.is_discounted());
        assert!(range.maximum_price.is_none());
    }

    #[test]
    fn test_stock_status_values() {
        let statuses: Vec<StockStatus> =
            serde_json::from_value(json!(["IN_STOCK", "OUT_OF_STOCK", "BACKORDER"])).unwrap();

        assert_eq!(
            statuses,
            vec![
                StockStatus::InStock,
                StockStatus::OutOfStock,
                StockStatus::Unknown
            ]
        );
        assert_eq!(
            serde_json::to_value(StockStatus::InStock).unwrap(),
            json!("IN_STOCK")
        );
    }

    #[test]
    fn test_money_omits_absent_fields() {
        let money = Money {
            value: Some(19.99),
            currency: None,
            ..Money::default()
        };
        assert_eq!(serde_json::to_value(&money).unwrap(), json!({"value": 19.99}));
    }

    #[test]
    fn test_nested_types_keep_unmodeled_fields() {
        let image: ProductImage = serde_json::from_value(json!({
            "url": "https://shop.example.com/mh07.jpg",
            "label": "Hero Hoodie",
            "disabled": false
        }))
        .unwrap();
        assert_eq!(image.extra.get("disabled"), Some(&json!(false)));

        let price: ProductPrice = serde_json::from_value(json!({
            "final_price": {"value": 49.0, "currency": "USD"},
            "fixed_product_taxes": [{"amount": {"value": 1.5, "currency": "USD"}, "label": "WEEE"}]
        }))
        .unwrap();
        assert_eq!(price.final_price.as_ref().and_then(|money| money.value), Some(49.0));
        assert_eq!(
            serde_json::to_value(&price).unwrap()["fixed_product_taxes"][0]["label"],
            "WEEE"
        );
    }
}
