//! # Magento GraphQL
//!
//! A query composition, batching and record layer for Magento storefronts
//! speaking GraphQL.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe client configuration via [`GraphqlClientConfig`] and
//!   [`GraphqlClientConfigBuilder`]
//! - A GraphQL client with GET/POST, sequential and concurrent batches, and
//!   categorized errors that never abort a batch
//! - Query composition from base fragments plus caller-supplied
//!   [`query::QueryHook`]s
//! - Lazy, single-shot retrievers for products, categories and searches
//! - Variant resolution for configurable products
//! - Named query templates with scope inheritance
//! - Generic [`record::Record`]s with pluggable display formatting
//!
//! ## Quick Start
//!
//! ```rust
//! use magento_graphql::{Endpoint, GraphqlClientConfig, HttpMethod, StoreCode};
//!
//! let config = GraphqlClientConfig::builder()
//!     .endpoint(Endpoint::new("https://shop.example.com/graphql").unwrap())
//!     .store_code(StoreCode::new("default").unwrap())
//!     .http_method(HttpMethod::Get)
//!     .http_header_entries(["X-Tenant=acme"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.http_method(), HttpMethod::Get);
//! ```
//!
//! ## Fetching a Product
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use magento_graphql::GraphqlClient;
//! use magento_graphql::model::VariantSelector;
//! use magento_graphql::query::{ProductIdentifier, QueryHook};
//! use magento_graphql::retriever::ProductRetriever;
//!
//! let client = Arc::new(GraphqlClient::new(config)?);
//! let mut retriever = ProductRetriever::new(client, ProductIdentifier::Sku("MH07".to_string()));
//!
//! // Extra fields land in `Product::extra`
//! retriever.extend_product_query_with(QueryHook::extend(|product| {
//!     product.field("meta_description");
//! }))?;
//!
//! let resolved = retriever
//!     .fetch_variant(&VariantSelector::Sku("MH07-XS-Black".to_string()))
//!     .await?;
//! println!("{:?}", resolved.price_range());
//! ```
//!
//! ## Batching
//!
//! ```rust,ignore
//! let responses = client
//!     .execute_all_async(["{storeConfig{store_code}}", "{currency{base_currency_code}}"])
//!     .await;
//!
//! // One response per request, in request order
//! for response in &responses {
//!     for error in &response.errors {
//!         eprintln!("{error}");
//!     }
//! }
//! ```
//!
//! ## Rendering Records
//!
//! ```rust
//! use magento_graphql::record::{PriceFormatter, RecordFactory};
//! use serde_json::json;
//!
//! let factory = RecordFactory::new().with_formatter(PriceFormatter::new());
//! let record = factory
//!     .record_from_value(json!({"final_price": {"value": 19.99, "currency": "USD"}}))
//!     .unwrap();
//!
//! assert_eq!(record.path(&["final_price", "value"]).as_str(), Some("$19.99"));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Clients and configuration are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Errors as data**: Query failures are reported per response, not thrown

pub mod clients;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod record;
pub mod registry;
pub mod retriever;

// Re-export public types at crate root for convenience
pub use config::{
    Endpoint, GraphqlClientConfig, GraphqlClientConfigBuilder, StoreCode, DENYLISTED_HEADERS,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    GraphqlClient, GraphqlError, GraphqlExecutor, GraphqlRequest, GraphqlResponse,
    GraphqlTransport, HttpClient, HttpError, HttpMethod, ResponseError, RUNTIME_ERROR_CATEGORY,
};
