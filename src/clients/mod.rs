//! Client types for talking to the commerce GraphQL backend.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: configured once per store, executes queries and batches
//! - [`GraphqlTransport`]: the HTTP seam; [`HttpClient`] is the `reqwest` implementation
//! - [`HttpRequest`] / [`HttpResponse`]: the raw HTTP exchange
//! - [`HttpMethod`]: GET or POST
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_graphql::{Endpoint, GraphqlClient, GraphqlClientConfig, HttpMethod};
//!
//! let config = GraphqlClientConfig::builder()
//!     .endpoint(Endpoint::new("https://shop.example.com/graphql").unwrap())
//!     .build()
//!     .unwrap();
//! let client = GraphqlClient::new(config)?;
//!
//! // Cacheable GET for a read-only query
//! let response = client
//!     .execute_with_method("{storeConfig{store_code}}", HttpMethod::Get)
//!     .await;
//! ```
//!
//! # Retry Behavior
//!
//! Nothing in this module retries. A transport that needs a retry policy
//! implements [`GraphqlTransport`] and is injected with
//! [`GraphqlClient::with_transport`].

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{GraphqlTransport, HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use graphql::{
    ErrorKind, ErrorLocation, GraphqlClient, GraphqlError, GraphqlExecutor, GraphqlRequest,
    GraphqlResponse, ResponseError, DEFAULT_ERROR_CATEGORY, RUNTIME_ERROR_CATEGORY,
};
