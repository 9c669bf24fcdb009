//! Product search retriever.

use std::sync::Arc;

use serde_json::Value;

use super::{decode, HookTarget, Lookup, Retriever, RetrieverError};
use crate::clients::{GraphqlExecutor, GraphqlRequest};
use crate::model::SearchResult;
use crate::query::{search_query, QueryError, QueryHook, SearchCriteria};

/// Runs one product search.
#[derive(Debug, Clone)]
pub struct ProductSearch {
    criteria: SearchCriteria,
    product_hooks: Vec<QueryHook>,
    variant_hooks: Vec<QueryHook>,
    search_hooks: Vec<QueryHook>,
}

impl ProductSearch {
    /// Creates a search without hooks.
    #[must_use]
    pub const fn new(criteria: SearchCriteria) -> Self {
        Self {
            criteria,
            product_hooks: Vec::new(),
            variant_hooks: Vec::new(),
            search_hooks: Vec::new(),
        }
    }

    /// Returns the search criteria.
    #[must_use]
    pub const fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }
}

impl Lookup for ProductSearch {
    type Entity = SearchResult;

    fn register_hook(&mut self, target: HookTarget, hook: QueryHook) -> Result<(), RetrieverError> {
        match target {
            HookTarget::Product => self.product_hooks.push(hook),
            HookTarget::Variant => self.variant_hooks.push(hook),
            HookTarget::Search => self.search_hooks.push(hook),
            HookTarget::Category => return Err(super::unsupported_target(target)),
        }
        Ok(())
    }

    fn build_request(&self) -> Result<GraphqlRequest, QueryError> {
        search_query(
            &self.criteria,
            &self.product_hooks,
            &self.variant_hooks,
            &self.search_hooks,
        )
        .map(GraphqlRequest::new)
    }

    fn extract(&self, data: Value) -> Result<SearchResult, RetrieverError> {
        match data.get("products") {
            Some(products) if products.is_object() => decode(products.clone()),
            _ => Err(RetrieverError::NotFound("product search".to_string())),
        }
    }
}

/// A [`Retriever`] for one page of search results.
pub type SearchRetriever = Retriever<ProductSearch>;

impl Retriever<ProductSearch> {
    /// Creates a search retriever in the configurable state.
    pub fn new(executor: Arc<dyn GraphqlExecutor>, criteria: SearchCriteria) -> Self {
        Self::with_lookup(executor, ProductSearch::new(criteria))
    }

    /// Registers a hook on the fragment of each found product.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieverError::AlreadyFetched`] after the fetch.
    pub fn extend_product_query_with(&mut self, hook: QueryHook) -> Result<(), RetrieverError> {
        self.register_hook(HookTarget::Product, hook)
    }

    /// Registers a hook on the variant fragment of each found product.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieverError::AlreadyFetched`] after the fetch.
    pub fn extend_variant_query_with(&mut self, hook: QueryHook) -> Result<(), RetrieverError> {
        self.register_hook(HookTarget::Variant, hook)
    }

    /// Registers a hook on the search result fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieverError::AlreadyFetched`] after the fetch.
    pub fn extend_search_query_with(&mut self, hook: QueryHook) -> Result<(), RetrieverError> {
        self.register_hook(HookTarget::Search, hook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::GraphqlResponse;
    use crate::retriever::stub::StubExecutor;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_retriever() {
        let executor = Arc::new(StubExecutor::new(GraphqlResponse::from_data(json!({
            "products": {
                "total_count": 2,
                "items": [{"sku": "24-MB01"}, {"sku": "24-MB04"}],
                "suggestions": [{"search": "bags"}]
            }
        }))));
        let mut retriever = SearchRetriever::new(
            executor.clone(),
            SearchCriteria::new().phrase("bag").page(1, 2),
        );
        retriever
            .extend_search_query_with(QueryHook::extend(|search| {
                search.object("suggestions", |s| {
                    s.field("search");
                });
            }))
            .unwrap();

        let result = retriever.fetch().await.unwrap();

        assert_eq!(result.total_count, Some(2));
        assert_eq!(result.items[1].sku.as_deref(), Some("24-MB04"));
        assert_eq!(result.extra.get("suggestions"), Some(&json!([{"search": "bags"}])));

        let query = executor.last_query();
        assert!(query.starts_with(r#"{products(search:"bag",currentPage:1,pageSize:2){total_count"#));
        assert!(query.ends_with(" suggestions{search}}}"));
    }

    #[tokio::test]
    async fn test_missing_products_is_not_found() {
        let executor = Arc::new(StubExecutor::new(GraphqlResponse::from_data(
            json!({"products": null}),
        )));
        let mut retriever = SearchRetriever::new(executor, SearchCriteria::new());

        assert!(matches!(
            retriever.fetch().await.unwrap_err(),
            RetrieverError::NotFound(_)
        ));
    }

    #[test]
    fn test_category_hooks_are_rejected() {
        let mut search = ProductSearch::new(SearchCriteria::new());
        assert!(search
            .register_hook(HookTarget::Category, QueryHook::extend(|_| {}))
            .is_err());
        assert!(search
            .register_hook(HookTarget::Variant, QueryHook::extend(|_| {}))
            .is_ok());
    }
}
