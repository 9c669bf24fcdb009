//! Categories.

use serde::{Deserialize, Serialize};

/// A category as returned by `categoryList`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Category {
    /// The category UID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// The category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The URL key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_key: Option<String>,

    /// The full URL path, e.g. `gear/bags`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,

    /// The description, usually HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The category image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// The number of products assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<i64>,

    /// The number of child categories. Magento returns this as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_count: Option<String>,

    /// Fields selected by extension hooks.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Category {
    /// Returns the number of child categories, if it is a valid number.
    #[must_use]
    pub fn children(&self) -> Option<u32> {
        self.children_count.as_deref()?.parse().ok()
    }
}
