//! Errors raised while constructing a GraphQL client.
//!
//! Query execution itself never fails with an error type: see
//! [`GraphqlResponse`](crate::clients::GraphqlResponse) for how failures are
//! reported per query.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL client construction.
///
/// # Example
///
/// ```rust
/// use magento_graphql::clients::graphql::GraphqlError;
/// use magento_graphql::clients::{HttpError, InvalidHttpRequestError};
///
/// let http_error = HttpError::InvalidRequest(InvalidHttpRequestError::MissingBody {
///     method: "POST".to_string(),
/// });
/// let error: GraphqlError = http_error.into();
/// assert!(error.to_string().contains("POST"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// The HTTP transport could not be created.
    #[error(transparent)]
    Http(#[from] HttpError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_from_http_error_conversion() {
        let http_error = HttpError::Response(HttpResponseError {
            code: 500,
            message: "Internal Server Error".to_string(),
            error_reference: None,
        });

        let graphql_error: GraphqlError = http_error.into();

        assert!(matches!(graphql_error, GraphqlError::Http(_)));
        assert!(graphql_error.to_string().contains("Internal Server Error"));
    }
}
