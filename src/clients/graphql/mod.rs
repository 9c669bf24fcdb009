//! GraphQL execution for the commerce backend.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: executes single requests and batches
//! - [`GraphqlExecutor`]: the execution seam used by retrievers
//! - [`GraphqlRequest`]: query text, variables and operation name
//! - [`GraphqlResponse`]: data plus categorized [`ResponseError`] entries
//! - [`GraphqlError`]: client construction errors
//!
//! # Error Categories
//!
//! Errors reported by the backend keep the category found in their
//! `extensions.category` member (for Magento, e.g. `graphql-no-such-entity`
//! or `graphql-input`). Failures on the client side, such as network errors,
//! timeouts, non-GraphQL error pages and undecodable payloads, are reported under
//! [`RUNTIME_ERROR_CATEGORY`]. Neither kind aborts a batch.
//!
//! # Batching
//!
//! [`GraphqlClient::execute_all`] runs a batch sequentially and
//! [`GraphqlClient::execute_all_async`] runs it concurrently with bounded
//! parallelism. Both return one response per input, in input order, and send
//! identical requests only once.

mod client;
mod errors;
mod request;
mod response;

pub use client::{GraphqlClient, GraphqlExecutor};
pub use errors::GraphqlError;
pub use request::GraphqlRequest;
pub use response::{
    ErrorKind, ErrorLocation, GraphqlResponse, ResponseError, DEFAULT_ERROR_CATEGORY,
    RUNTIME_ERROR_CATEGORY,
};
