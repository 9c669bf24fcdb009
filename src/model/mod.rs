//! Typed storefront entities.
//!
//! Each model covers the fields of its base query fragment. Fields selected by
//! extension hooks are collected into an `extra` map, so extended queries still
//! decode.
//!
//! # Example
//!
//! ```rust
//! use magento_graphql::model::Category;
//! use serde_json::json;
//!
//! let category: Category = serde_json::from_value(json!({
//!     "uid": "MTI=",
//!     "name": "Bags",
//!     "custom_banner": "sale.png"
//! }))
//! .unwrap();
//!
//! assert_eq!(category.name.as_deref(), Some("Bags"));
//! assert_eq!(category.extra["custom_banner"], "sale.png");
//! ```

mod category;
mod common;
mod product;
mod search;

use serde::{Deserialize, Deserializer};

pub use category::Category;
pub use common::{
    MediaGalleryEntry, Money, PriceRange, ProductDiscount, ProductImage, ProductPrice,
    StockStatus,
};
pub use product::{
    ConfigurableOption, ConfigurableOptionValue, ConfigurableVariant, Product, ResolvedProduct,
    VariantAttribute, VariantProduct, VariantSelector,
};
pub use search::{Aggregation, AggregationOption, SearchPageInfo, SearchResult};

/// Deserializes `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
