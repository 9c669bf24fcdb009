//! HTTP-level error types for the GraphQL transport.
//!
//! - [`HttpResponseError`]: a non-2xx response that carried no GraphQL envelope
//! - [`InvalidHttpRequestError`]: a request that failed validation before sending
//! - [`HttpError`]: unified error type for the transport
//!
//! None of these escape [`GraphqlClient`](crate::clients::GraphqlClient)
//! execution: they are mapped to runtime-category
//! [`ResponseError`](crate::clients::ResponseError) entries.

use thiserror::Error;

/// Error describing a non-successful HTTP response.
///
/// # Example
///
/// ```rust
/// use magento_graphql::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 503,
///     message: "Service Unavailable".to_string(),
///     error_reference: Some("req-1".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 503: Service Unavailable");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, or a description of it.
    pub message: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET request was given a body.
    #[error("Cannot send a body with {method}; use query parameters instead.")]
    UnexpectedBody {
        /// The HTTP method that forbids a body.
        method: String,
    },
}

/// Unified error type for the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network, timeout or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
