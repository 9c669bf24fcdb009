//! Product retriever.

use std::sync::Arc;

use serde_json::Value;

use super::{decode, unsupported_target, HookTarget, Lookup, Retriever, RetrieverError};
use crate::clients::{GraphqlExecutor, GraphqlRequest};
use crate::model::{Product, ResolvedProduct, VariantSelector};
use crate::query::{product_query, ProductIdentifier, QueryError, QueryHook};

/// Looks up one product by SKU or URL key.
#[derive(Debug, Clone)]
pub struct ProductLookup {
    identifier: ProductIdentifier,
    product_hooks: Vec<QueryHook>,
    variant_hooks: Vec<QueryHook>,
}

impl ProductLookup {
    /// Creates a lookup without hooks.
    #[must_use]
    pub const fn new(identifier: ProductIdentifier) -> Self {
        Self {
            identifier,
            product_hooks: Vec::new(),
            variant_hooks: Vec::new(),
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn identifier(&self) -> &ProductIdentifier {
        &self.identifier
    }
}

impl Lookup for ProductLookup {
    type Entity = Product;

    fn register_hook(&mut self, target: HookTarget, hook: QueryHook) -> Result<(), RetrieverError> {
        match target {
            HookTarget::Product => self.product_hooks.push(hook),
            HookTarget::Variant => self.variant_hooks.push(hook),
            other => return Err(unsupported_target(other)),
        }
        Ok(())
    }

    fn build_request(&self) -> Result<GraphqlRequest, QueryError> {
        product_query(&self.identifier, &self.product_hooks, &self.variant_hooks)
            .map(GraphqlRequest::new)
    }

    fn extract(&self, data: Value) -> Result<Product, RetrieverError> {
        let items = match data.pointer("/products/items") {
            Some(Value::Array(items)) => items,
            _ => return Err(RetrieverError::NotFound(self.identifier.to_string())),
        };

        // Filters on the storefront are not always exact; prefer the item
        // that carries the requested value.
        let attribute = self.identifier.attribute();
        let wanted = self.identifier.value();
        let item = items
            .iter()
            .find(|item| item.get(attribute).and_then(Value::as_str) == Some(wanted))
            .or_else(|| items.first())
            .ok_or_else(|| RetrieverError::NotFound(self.identifier.to_string()))?;

        decode(item.clone())
    }
}

/// A [`Retriever`] for one product.
pub type ProductRetriever = Retriever<ProductLookup>;

impl Retriever<ProductLookup> {
    /// Creates a product retriever in the configurable state.
    pub fn new(executor: Arc<dyn GraphqlExecutor>, identifier: ProductIdentifier) -> Self {
        Self::with_lookup(executor, ProductLookup::new(identifier))
    }

    /// Registers a hook on the product fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieverError::AlreadyFetched`] after the fetch.
    pub fn extend_product_query_with(&mut self, hook: QueryHook) -> Result<(), RetrieverError> {
        self.register_hook(HookTarget::Product, hook)
    }

    /// Registers a hook on the variant fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieverError::AlreadyFetched`] after the fetch.
    pub fn extend_variant_query_with(&mut self, hook: QueryHook) -> Result<(), RetrieverError> {
        self.register_hook(HookTarget::Variant, hook)
    }

    /// Fetches the product and resolves the variant matching `selector`,
    /// falling back to the base product.
    ///
    /// # Errors
    ///
    /// Returns the cached fetch failure.
    pub async fn fetch_variant(
        &mut self,
        selector: &VariantSelector,
    ) -> Result<ResolvedProduct<'_>, RetrieverError> {
        let product = self.fetch().await?;
        Ok(product.resolve_variant(selector))
    }
}
