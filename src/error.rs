//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured store fails when the client is built, not on the first query.
//!
//! # Example
//!
//! ```rust
//! use magento_graphql::{ConfigError, Endpoint};
//!
//! let result = Endpoint::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyEndpoint)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The GraphQL endpoint cannot be empty.
    #[error("GraphQL endpoint cannot be empty. Please provide the URL of the commerce GraphQL service.")]
    EmptyEndpoint,

    /// The GraphQL endpoint is not a usable HTTP(S) URL.
    #[error("Invalid GraphQL endpoint '{url}'. Expected an absolute http or https URL (e.g., 'https://shop.example.com/graphql').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The store code is not a valid Magento store view code.
    #[error("Invalid store code '{code}'. Store codes contain only lowercase letters, digits and underscores, and start with a letter.")]
    InvalidStoreCode {
        /// The invalid code that was provided.
        code: String,
    },

    /// Batch concurrency must allow at least one in-flight request.
    #[error("Invalid max concurrency {value}. At least one concurrent request is required.")]
    InvalidConcurrency {
        /// The rejected value.
        value: usize,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
