//! Product search results.

use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::product::Product;

/// Paging information of a search result.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SearchPageInfo {
    /// The 1-based page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,

    /// Products per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// The number of pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One value of a layered-navigation facet.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AggregationOption {
    /// The display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The filter value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// The number of matching products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A layered-navigation facet.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// The attribute the facet filters on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_code: Option<String>,

    /// The display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The number of options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// The facet values.
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<AggregationOption>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A page of product search results.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchResult {
    /// The number of matching products across all pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,

    /// Paging information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<SearchPageInfo>,

    /// The products on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Product>,

    /// Layered-navigation facets.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub aggregations: Vec<Aggregation>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SearchResult {
    /// Returns the facet for `attribute_code`, if present.
    #[must_use]
    pub fn aggregation(&self, attribute_code: &str) -> Option<&Aggregation> {
        self.aggregations
            .iter()
            .find(|aggregation| aggregation.attribute_code.as_deref() == Some(attribute_code))
    }

    /// Returns `true` if further pages exist.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page_info
            .as_ref()
            .and_then(|info| Some(info.current_page? < info.total_pages?))
            .unwrap_or(false)
    }
}
