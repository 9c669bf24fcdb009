//! Products, configurable variants and variant resolution.
//!
//! A configurable product carries its options and the full list of variants.
//! [`Product::resolve_variant`] picks one of them from a [`VariantSelector`]
//! and falls back to the base product when nothing matches, so that callers
//! always get something to render.
//!
//! # Example
//!
//! ```rust
//! use magento_graphql::model::{Product, VariantSelector};
//! use serde_json::json;
//!
//! let product: Product = serde_json::from_value(json!({
//!     "__typename": "ConfigurableProduct",
//!     "sku": "MH07",
//!     "variants": [
//!         {"attributes": [{"uid": "Y29sb3I=", "code": "color"}], "product": {"sku": "MH07-XS-Black"}}
//!     ]
//! }))
//! .unwrap();
//!
//! let resolved = product.resolve_variant(&VariantSelector::Sku("MH07-XS-Black".to_string()));
//! assert!(resolved.is_variant());
//! assert_eq!(resolved.sku(), Some("MH07-XS-Black"));
//!
//! let fallback = product.resolve_variant(&VariantSelector::Sku("unknown".to_string()));
//! assert_eq!(fallback.sku(), Some("MH07"));
//! ```

use serde::{Deserialize, Serialize};

use super::common::{MediaGalleryEntry, PriceRange, ProductImage, StockStatus};
use super::null_as_default;
use crate::query::CONFIGURABLE_PRODUCT_TYPE;

/// One selectable value of a configurable option.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigurableOptionValue {
    /// The value UID, as used in variant attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// The legacy value index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_index: Option<i64>,

    /// The display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An option a shopper chooses on a configurable product, e.g. color.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigurableOption {
    /// The option UID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// The attribute code, e.g. `color`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_code: Option<String>,

    /// The display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The selectable values.
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<ConfigurableOptionValue>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An option value a variant is made of.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VariantAttribute {
    /// The option value UID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// The attribute code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// The legacy value index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_index: Option<i64>,

    /// The display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The simple product behind a variant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct VariantProduct {
    /// The GraphQL type name.
    #[serde(rename = "__typename", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// The product UID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// The variant SKU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// The variant name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Stock availability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<StockStatus>,

    /// The variant price range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,

    /// The variant images.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub media_gallery: Vec<MediaGalleryEntry>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A variant of a configurable product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigurableVariant {
    /// The option values this variant is made of.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<VariantAttribute>,

    /// The simple product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<VariantProduct>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConfigurableVariant {
    fn sku(&self) -> Option<&str> {
        self.product.as_ref().and_then(|product| product.sku.as_deref())
    }

    fn uid(&self) -> Option<&str> {
        self.product.as_ref().and_then(|product| product.uid.as_deref())
    }

    fn has_option_values(&self, uids: &[String]) -> bool {
        !uids.is_empty()
            && uids.iter().all(|wanted| {
                self.attributes
                    .iter()
                    .any(|attribute| attribute.uid.as_deref() == Some(wanted.as_str()))
            })
    }
}

/// A product as returned by the storefront.
///
/// Fields selected by the base product fragment are typed; fields added by
/// extension hooks are kept in [`Product::extra`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Product {
    /// The GraphQL type name, e.g. `SimpleProduct`.
    #[serde(rename = "__typename", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// The product UID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// The SKU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// The product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The URL key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_key: Option<String>,

    /// Stock availability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<StockStatus>,

    /// The price range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,

    /// The listing image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_image: Option<ProductImage>,

    /// Configurable options. Empty for other product types.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub configurable_options: Vec<ConfigurableOption>,

    /// Configurable variants. Empty for other product types.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub variants: Vec<ConfigurableVariant>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Returns `true` for configurable products.
    #[must_use]
    pub fn is_configurable(&self) -> bool {
        self.type_name.as_deref() == Some(CONFIGURABLE_PRODUCT_TYPE) || !self.variants.is_empty()
    }

    /// Returns the variant matching `selector`, or the base product.
    #[must_use]
    pub fn resolve_variant(&self, selector: &VariantSelector) -> ResolvedProduct<'_> {
        let found = self.variants.iter().find(|variant| match selector {
            VariantSelector::Sku(sku) => variant.sku() == Some(sku.as_str()),
            VariantSelector::Uid(uid) => variant.uid() == Some(uid.as_str()),
            VariantSelector::OptionUids(uids) => variant.has_option_values(uids),
        });

        match found {
            Some(variant) => ResolvedProduct::Variant {
                product: self,
                variant,
            },
            None => {
                if self.is_configurable() {
                    tracing::debug!(
                        sku = self.sku.as_deref().unwrap_or_default(),
                        ?selector,
                        "No variant matches selector, using base product"
                    );
                }
                ResolvedProduct::Base(self)
            }
        }
    }
}

/// Picks a variant of a configurable product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantSelector {
    /// The variant with this SKU.
    Sku(String),
    /// The variant whose product has this UID.
    Uid(String),
    /// The variant made of all these option value UIDs.
    OptionUids(Vec<String>),
}

/// The outcome of variant resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedProduct<'a> {
    /// A matching variant was found.
    Variant {
        /// The configurable product.
        product: &'a Product,
        /// The matching variant.
        variant: &'a ConfigurableVariant,
    },
    /// No variant matched; the base product stands in.
    Base(&'a Product),
}

impl<'a> ResolvedProduct<'a> {
    /// Returns `true` if a variant was found.
    #[must_use]
    pub const fn is_variant(&self) -> bool {
        matches!(self, Self::Variant { .. })
    }

    /// Returns the base product.
    #[must_use]
    pub const fn base(&self) -> &'a Product {
        match self {
            Self::Variant { product, .. } | Self::Base(product) => *product,
        }
    }

    /// Returns the matched variant, if any.
    #[must_use]
    pub const fn variant(&self) -> Option<&'a ConfigurableVariant> {
        match self {
            Self::Variant { variant, .. } => Some(*variant),
            Self::Base(_) => None,
        }
    }

    fn variant_product(&self) -> Option<&'a VariantProduct> {
        self.variant().and_then(|variant| variant.product.as_ref())
    }

    /// Returns the SKU of the variant, or of the base product.
    #[must_use]
    pub fn sku(&self) -> Option<&'a str> {
        self.variant_product()
            .and_then(|product| product.sku.as_deref())
            .or_else(|| self.base().sku.as_deref())
    }

    /// Returns the name of the variant, or of the base product.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.variant_product()
            .and_then(|product| product.name.as_deref())
            .or_else(|| self.base().name.as_deref())
    }

    /// Returns the price range of the variant, or of the base product.
    #[must_use]
    pub fn price_range(&self) -> Option<&'a PriceRange> {
        self.variant_product()
            .and_then(|product| product.price_range.as_ref())
            .or_else(|| self.base().price_range.as_ref())
    }

    /// Returns the stock status of the variant, or of the base product.
    #[must_use]
    pub fn stock_status(&self) -> Option<StockStatus> {
        self.variant_product()
            .and_then(|product| product.stock_status)
            .or(self.base().stock_status)
    }
}
