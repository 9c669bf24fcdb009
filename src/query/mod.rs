//! GraphQL query composition.
//!
//! Queries are built from a small selection-set model instead of string
//! concatenation:
//!
//! - [`SelectionSet`], [`Field`] and [`InlineFragment`]: the selection model,
//!   rendered compactly through `Display`
//! - [`ArgValue`]: inline argument literals with string escaping
//! - [`QueryHook`]: caller-supplied extensions applied in registration order
//! - base fragments for products, variants, categories and searches
//! - [`product_query`], [`category_query`] and [`search_query`]: complete
//!   documents
//!
//! # Example
//!
//! ```rust
//! use magento_graphql::query::{product_query, ProductIdentifier, QueryHook};
//!
//! let hooks = vec![QueryHook::extend(|product| {
//!     product.field("meta_description");
//! })];
//!
//! let query = product_query(&ProductIdentifier::Sku("MT07".to_string()), &hooks, &[]).unwrap();
//! assert!(query.starts_with(r#"{products(filter:{sku:{eq:"MT07"}}){items{__typename uid sku"#));
//! assert!(query.contains("meta_description"));
//! ```

mod document;
mod fragments;
mod hook;
mod selection;
mod value;

use thiserror::Error;

pub use document::{
    category_query, product_query, search_query, CategoryIdentifier, FilterCondition,
    ProductIdentifier, SearchCriteria, SortDirection, DEFAULT_PAGE_SIZE,
};
pub use fragments::{
    base_category_fragment, base_product_fragment, base_search_fragment, base_variant_fragment,
    category_fragment, product_fragment, search_fragment, variant_fragment,
    CONFIGURABLE_PRODUCT_TYPE,
};
pub use hook::{apply_hooks, QueryHook};
pub use selection::{Field, InlineFragment, Selection, SelectionSet};
pub use value::{is_graphql_name, ArgValue};

/// Error raised while composing a query.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Two selections claim the same response key with different
    /// arguments.
    #[error("Field '{field}' is already selected with different arguments")]
    ConflictingArguments {
        /// The clashing response key.
        field: String,
    },

    /// A name written into the query text is not a valid GraphQL name.
    #[error("'{name}' is not a valid GraphQL name")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// A field that needs a sub-selection has none.
    #[error("Field '{field}' requires a non-empty selection")]
    EmptySelection {
        /// The response key of the field.
        field: String,
    },

    /// An extension hook rejected the fragment.
    #[error("Query hook failed: {0}")]
    Hook(String),
}

impl QueryError {
    /// Creates a hook error with the given message.
    #[must_use]
    pub fn hook(message: impl Into<String>) -> Self {
        Self::Hook(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_messages() {
        let conflict = QueryError::ConflictingArguments {
            field: "products".to_string(),
        };
        assert_eq!(
            conflict.to_string(),
            "Field 'products' is already selected with different arguments"
        );
        assert_eq!(
            QueryError::hook("denied").to_string(),
            "Query hook failed: denied"
        );
    }
}
