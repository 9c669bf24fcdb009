//! Configuration types for the GraphQL client.
//!
//! A [`GraphqlClientConfig`] is resolved once per store scope and shared by
//! every request made through the client built from it.
//!
//! # Overview
//!
//! - [`GraphqlClientConfig`]: the resolved, immutable client configuration
//! - [`GraphqlClientConfigBuilder`]: a builder for [`GraphqlClientConfig`]
//! - [`Endpoint`]: a validated endpoint URL
//! - [`StoreCode`]: a validated Magento store view code
//!
//! # Example
//!
//! ```rust
//! use magento_graphql::{Endpoint, GraphqlClientConfig, HttpMethod, StoreCode};
//!
//! let config = GraphqlClientConfig::builder()
//!     .endpoint(Endpoint::new("https://shop.example.com/graphql").unwrap())
//!     .store_code(StoreCode::new("default").unwrap())
//!     .http_method(HttpMethod::Get)
//!     .http_header("X-Custom", "value")
//!     .http_header("Authorization", "ignored")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.http_method(), HttpMethod::Get);
//! assert!(config.http_headers().contains_key("X-Custom"));
//! assert!(!config.http_headers().contains_key("Authorization"));
//! ```

mod headers;
mod newtypes;

pub use headers::{
    is_denylisted_header, parse_header_entry, DENYLISTED_HEADERS, PREVIEW_VERSION_HEADER,
    STORE_HEADER,
};
pub use newtypes::{Endpoint, StoreCode};

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::HttpMethod;
use crate::error::ConfigError;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of requests a batch keeps in flight at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Resolved configuration of a GraphQL client.
///
/// # Thread Safety
///
/// `GraphqlClientConfig` is `Clone`, `Send` and `Sync`.
#[derive(Clone, Debug)]
pub struct GraphqlClientConfig {
    endpoint: Endpoint,
    store_code: Option<StoreCode>,
    http_method: HttpMethod,
    http_headers: HashMap<String, String>,
    preview_version: Option<u64>,
    request_timeout: Duration,
    max_concurrency: usize,
    accept_self_signed_certificates: bool,
    user_agent_prefix: Option<String>,
}

impl GraphqlClientConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> GraphqlClientConfigBuilder {
        GraphqlClientConfigBuilder::new()
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the store view code, if configured.
    #[must_use]
    pub const fn store_code(&self) -> Option<&StoreCode> {
        self.store_code.as_ref()
    }

    /// Returns the default HTTP method used for queries.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    /// Returns the custom headers that survived denylist filtering.
    #[must_use]
    pub const fn http_headers(&self) -> &HashMap<String, String> {
        &self.http_headers
    }

    /// Returns the content preview version, if configured.
    #[must_use]
    pub const fn preview_version(&self) -> Option<u64> {
        self.preview_version
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the maximum number of concurrent requests in a batch.
    #[must_use]
    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Returns whether invalid TLS certificates are accepted.
    #[must_use]
    pub const fn accept_self_signed_certificates(&self) -> bool {
        self.accept_self_signed_certificates
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify GraphqlClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClientConfig>();
};

/// Builder for [`GraphqlClientConfig`].
///
/// `endpoint` is required. Defaults:
///
/// - `http_method`: [`HttpMethod::Post`]
/// - `request_timeout`: [`DEFAULT_REQUEST_TIMEOUT`]
/// - `max_concurrency`: [`DEFAULT_MAX_CONCURRENCY`]
/// - `accept_self_signed_certificates`: `false`
/// - everything else: unset
///
/// Custom headers named in [`DENYLISTED_HEADERS`] are dropped by
/// [`build`](Self::build) without an error.
#[derive(Debug, Default)]
pub struct GraphqlClientConfigBuilder {
    endpoint: Option<Endpoint>,
    store_code: Option<StoreCode>,
    http_method: Option<HttpMethod>,
    http_headers: HashMap<String, String>,
    preview_version: Option<u64>,
    request_timeout: Option<Duration>,
    max_concurrency: Option<usize>,
    accept_self_signed_certificates: bool,
    user_agent_prefix: Option<String>,
}

impl GraphqlClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the store view code sent in the `Store` header.
    #[must_use]
    pub fn store_code(mut self, code: StoreCode) -> Self {
        self.store_code = Some(code);
        self
    }

    /// Sets the default HTTP method.
    #[must_use]
    pub const fn http_method(mut self, method: HttpMethod) -> Self {
        self.http_method = Some(method);
        self
    }

    /// Adds a custom header.
    #[must_use]
    pub fn http_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_headers.insert(name.into(), value.into());
        self
    }

    /// Adds custom headers from `name=value` entries.
    ///
    /// Entries that cannot be parsed are skipped with a warning.
    #[must_use]
    pub fn http_header_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let entry = entry.as_ref();
            match parse_header_entry(entry) {
                Some((name, value)) => {
                    self.http_headers.insert(name, value);
                }
                None => tracing::warn!("Skipping malformed HTTP header entry '{}'", entry),
            }
        }
        self
    }

    /// Sets the content preview version sent in the `Preview-Version` header.
    #[must_use]
    pub const fn preview_version(mut self, version: u64) -> Self {
        self.preview_version = Some(version);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets how many requests a batch keeps in flight at once.
    #[must_use]
    pub const fn max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = Some(max);
        self
    }

    /// Accepts self-signed or otherwise invalid TLS certificates.
    ///
    /// Only meant for local development backends.
    #[must_use]
    pub const fn accept_self_signed_certificates(mut self, accept: bool) -> Self {
        self.accept_self_signed_certificates = accept;
        self
    }

    /// Sets the user agent prefix.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no endpoint was set and
    /// [`ConfigError::InvalidConcurrency`] for a concurrency of zero.
    pub fn build(self) -> Result<GraphqlClientConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;

        let max_concurrency = self.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY);
        if max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: max_concurrency,
            });
        }

        Ok(GraphqlClientConfig {
            endpoint,
            store_code: self.store_code,
            http_method: self.http_method.unwrap_or(HttpMethod::Post),
            http_headers: headers::filter_denylisted(self.http_headers),
            preview_version: self.preview_version,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            max_concurrency,
            accept_self_signed_certificates: self.accept_self_signed_certificates,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
