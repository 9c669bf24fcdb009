//! Lazy, single-shot entity retrievers.
//!
//! A retriever is bound to one identifier and goes through two states:
//!
//! 1. Configurable: query extension hooks can be registered.
//! 2. Fetched: the query ran exactly once and its outcome is cached.
//!
//! The first [`Retriever::fetch`] builds the query, executes it and caches the
//! outcome, successful or not. Later calls return the cached entity or a clone
//! of the cached error without touching the backend. Registering a hook after
//! the fetch fails with [`RetrieverError::AlreadyFetched`] and leaves the
//! retriever unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use magento_graphql::query::{ProductIdentifier, QueryHook};
//! use magento_graphql::retriever::ProductRetriever;
//!
//! let mut retriever = ProductRetriever::new(
//!     Arc::new(client),
//!     ProductIdentifier::Sku("MH07".to_string()),
//! );
//! retriever.extend_product_query_with(QueryHook::extend(|product| {
//!     product.field("meta_description");
//! }))?;
//!
//! let product = retriever.fetch().await?;
//! println!("{:?}", product.extra.get("meta_description"));
//! ```

mod category;
mod product;
mod search;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::clients::{GraphqlExecutor, GraphqlRequest, ResponseError};
use crate::query::{QueryError, QueryHook};

pub use category::{CategoryLookup, CategoryRetriever};
pub use product::{ProductLookup, ProductRetriever};
pub use search::{ProductSearch, SearchRetriever};

fn join_errors(errors: &[ResponseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error returned by retrievers.
///
/// The error is cached with the retriever's outcome, hence `Clone`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RetrieverError {
    /// A query hook was registered after the fetch.
    #[error("Query hooks cannot be registered after the data was fetched")]
    AlreadyFetched,

    /// The query could not be composed.
    #[error("Failed to compose query: {0}")]
    Query(#[from] QueryError),

    /// The backend answered with GraphQL errors.
    #[error("Backend returned errors: {}", join_errors(.0))]
    Backend(Vec<ResponseError>),

    /// The backend could not be reached or its answer could not be read.
    #[error("Request failed: {}", join_errors(.0))]
    Transport(Vec<ResponseError>),

    /// The query succeeded but matched nothing.
    #[error("No entity found for {0}")]
    NotFound(String),

    /// The entity could not be decoded into its model.
    #[error("Failed to decode entity: {0}")]
    Decode(String),
}

/// Describes how one kind of entity is queried and extracted.
///
/// Implement this to add a new kind of retriever; see [`ProductLookup`] for
/// an example.
pub trait Lookup: Send + Sync {
    /// The decoded entity.
    type Entity: Send + Sync;

    /// Registers a hook on the named fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieverError::Query`] if this lookup has no such fragment.
    fn register_hook(&mut self, fragment: HookTarget, hook: QueryHook) -> Result<(), RetrieverError>;

    /// Composes the request for the current hooks.
    ///
    /// # Errors
    ///
    /// Returns the first hook error.
    fn build_request(&self) -> Result<GraphqlRequest, QueryError>;

    /// Extracts the entity from the response `data`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieverError::NotFound`] or [`RetrieverError::Decode`].
    fn extract(&self, data: serde_json::Value) -> Result<Self::Entity, RetrieverError>;
}

/// The fragment a hook applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookTarget {
    /// The product fragment.
    Product,
    /// The variant fragment nested in configurable products.
    Variant,
    /// The category fragment.
    Category,
    /// The search result fragment.
    Search,
}

impl fmt::Display for HookTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Product => "product",
            Self::Variant => "variant",
            Self::Category => "category",
            Self::Search => "search",
        };
        f.write_str(name)
    }
}

pub(crate) fn unsupported_target(target: HookTarget) -> RetrieverError {
    RetrieverError::Query(QueryError::hook(format!(
        "no {target} fragment in this query"
    )))
}

/// A lazy retriever for one entity.
pub struct Retriever<L: Lookup> {
    executor: Arc<dyn GraphqlExecutor>,
    lookup: L,
    outcome: Option<Result<L::Entity, RetrieverError>>,
}

impl<L: Lookup + fmt::Debug> fmt::Debug for Retriever<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retriever")
            .field("lookup", &self.lookup)
            .field("fetched", &self.is_fetched())
            .finish_non_exhaustive()
    }
}

impl<L: Lookup> Retriever<L> {
    /// Creates a retriever in the configurable state.
    pub fn with_lookup(executor: Arc<dyn GraphqlExecutor>, lookup: L) -> Self {
        Self {
            executor,
            lookup,
            outcome: None,
        }
    }

    /// Returns the lookup.
    pub const fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Returns `true` once the query has run.
    pub const fn is_fetched(&self) -> bool {
        self.outcome.is_some()
    }

    /// Registers a hook on the given fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RetrieverError::AlreadyFetched`] after the fetch, in which
    /// case nothing is registered.
    pub fn register_hook(&mut self, target: HookTarget, hook: QueryHook) -> Result<(), RetrieverError> {
        if self.is_fetched() {
            tracing::warn!(%target, "Ignoring query hook registered after fetch");
            return Err(RetrieverError::AlreadyFetched);
        }
        self.lookup.register_hook(target, hook)
    }

    /// Returns the request the next fetch would send.
    ///
    /// # Errors
    ///
    /// Returns the first hook error.
    pub fn request(&self) -> Result<GraphqlRequest, QueryError> {
        self.lookup.build_request()
    }

    /// Fetches the entity, running the query on the first call only.
    ///
    /// # Errors
    ///
    /// Returns the cached failure of the first fetch.
    pub async fn fetch(&mut self) -> Result<&L::Entity, RetrieverError> {
        let outcome = match self.outcome.take() {
            Some(outcome) => outcome,
            None => self.run().await,
        };
        self.outcome.insert(outcome).as_ref().map_err(Clone::clone)
    }

    async fn run(&self) -> Result<L::Entity, RetrieverError> {
        let request = self.lookup.build_request()?;
        tracing::debug!(query = %request.query, "Fetching entity");

        let response = self.executor.execute(request).await;
        if !response.errors.is_empty() {
            if response.has_transport_errors() {
                return Err(RetrieverError::Transport(response.errors));
            }
            return Err(RetrieverError::Backend(response.errors));
        }

        let data = response
            .data
            .ok_or_else(|| RetrieverError::NotFound("empty response".to_string()))?;
        self.lookup.extract(data)
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, RetrieverError> {
    serde_json::from_value(value).map_err(|error| RetrieverError::Decode(error.to_string()))
}
