//! Category retriever.

use std::sync::Arc;

use serde_json::Value;

use super::{decode, unsupported_target, HookTarget, Lookup, Retriever, RetrieverError};
use crate::clients::{GraphqlExecutor, GraphqlRequest};
use crate::model::Category;
use crate::query::{category_query, CategoryIdentifier, QueryError, QueryHook};

/// Looks up one category by UID, id or URL path.
#[derive(Debug, Clone)]
pub struct CategoryLookup {
    identifier: CategoryIdentifier,
    hooks: Vec<QueryHook>,
}

impl CategoryLookup {
    /// Creates a lookup without hooks.
    #[must_use]
    pub const fn new(identifier: CategoryIdentifier) -> Self {
        Self {
            identifier,
            hooks: Vec::new(),
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn identifier(&self) -> &CategoryIdentifier {
        &self.identifier
    }
}

impl Lookup for CategoryLookup {
    type Entity = Category;

    fn register_hook(&mut self, target: HookTarget, hook: QueryHook) -> Result<(), RetrieverError> {
        if target != HookTarget::Category {
            return Err(unsupported_target(target));
        }
        self.hooks.push(hook);
        Ok(())
    }

    fn build_request(&self) -> Result<GraphqlRequest, QueryError> {
        category_query(&self.identifier, &self.hooks).map(GraphqlRequest::new)
    }

    fn extract(&self, data: Value) -> Result<Category, RetrieverError> {
        match data.get("categoryList").and_then(Value::as_array).and_then(|list| list.first()) {
            Some(category) => decode(category.clone()),
            None => Err(RetrieverError::NotFound(self.identifier.to_string())),
        }
    }
}

/// A [`Retriever`] for one category.
pub type CategoryRetriever = Retriever<CategoryLookup>;

impl Retriever<CategoryLookup> {
    /// Creates a category retriever in the configurable state.
    pub fn new(executor: Arc<dyn GraphqlExecutor>, identifier: CategoryIdentifier) -> Self {
        Self::with_lookup(executor, CategoryLookup::new(identifier))
    }

    /// Registers a hook on the category fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieverError::AlreadyFetched`] after the fetch.
    pub fn extend_category_query_with(&mut self, hook: QueryHook) -> Result<(), RetrieverError> {
        self.register_hook(HookTarget::Category, hook)
    }
}
