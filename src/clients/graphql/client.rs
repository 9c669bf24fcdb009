//! GraphQL execution client.
//!
//! This module provides [`GraphqlClient`], which executes single queries and
//! batches against the configured commerce backend, and the
//! [`GraphqlExecutor`] seam retrievers depend on.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::de::DeserializeOwned;

use crate::clients::graphql::{GraphqlError, GraphqlRequest, GraphqlResponse};
use crate::clients::{GraphqlTransport, HttpClient, HttpMethod};
use crate::config::{GraphqlClientConfig, PREVIEW_VERSION_HEADER, STORE_HEADER};

/// Executes GraphQL requests.
///
/// Retrievers and scoped template fetches depend on this trait rather than on
/// [`GraphqlClient`] directly, so tests can count or script executions.
#[async_trait]
pub trait GraphqlExecutor: Send + Sync {
    /// Executes one request with the executor's default HTTP method.
    async fn execute(&self, request: GraphqlRequest) -> GraphqlResponse;
}

/// GraphQL client for one store configuration.
///
/// The client is configured once and reused across retrievers and requests.
/// Execution never returns `Err`: every outcome, including transport failures,
/// is a [`GraphqlResponse`] whose errors are categorized.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use magento_graphql::{Endpoint, GraphqlClient, GraphqlClientConfig};
///
/// let config = GraphqlClientConfig::builder()
///     .endpoint(Endpoint::new("https://shop.example.com/graphql").unwrap())
///     .build()
///     .unwrap();
/// let client = GraphqlClient::new(config)?;
///
/// let response = client.execute("{storeConfig{store_code}}").await;
/// if response.is_ok() {
///     println!("{}", response.data.unwrap());
/// }
///
/// // Batches keep positional correspondence with the input.
/// let responses = client
///     .execute_all_async(["{storeConfig{store_code}}", "{currency{base_currency_code}}"])
///     .await;
/// assert_eq!(responses.len(), 2);
/// ```
pub struct GraphqlClient {
    config: GraphqlClientConfig,
    transport: Arc<dyn GraphqlTransport>,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl fmt::Debug for GraphqlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GraphqlClient {
    /// Creates a client that talks HTTP to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] if the HTTP transport cannot be created.
    pub fn new(config: GraphqlClientConfig) -> Result<Self, GraphqlError> {
        let transport = HttpClient::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over an injected transport.
    #[must_use]
    pub fn with_transport(config: GraphqlClientConfig, transport: Arc<dyn GraphqlTransport>) -> Self {
        Self { config, transport }
    }

    /// Returns the resolved configuration.
    #[must_use]
    pub const fn configuration(&self) -> &GraphqlClientConfig {
        &self.config
    }

    /// Returns the configuration-derived headers sent with every request.
    ///
    /// This is the denylist-filtered custom headers plus `Store` and
    /// `Preview-Version` when configured.
    #[must_use]
    pub fn http_header_map(&self) -> HashMap<String, String> {
        let mut headers = self.config.http_headers().clone();
        if let Some(store_code) = self.config.store_code() {
            headers.insert(STORE_HEADER.to_string(), store_code.to_string());
        }
        if let Some(version) = self.config.preview_version() {
            headers.insert(PREVIEW_VERSION_HEADER.to_string(), version.to_string());
        }
        headers
    }

    /// Executes a request with the configured HTTP method.
    pub async fn execute(&self, request: impl Into<GraphqlRequest>) -> GraphqlResponse {
        self.execute_with_method(request, self.config.http_method())
            .await
    }

    /// Executes a request with an explicit HTTP method.
    pub async fn execute_with_method(
        &self,
        request: impl Into<GraphqlRequest>,
        method: HttpMethod,
    ) -> GraphqlResponse {
        let request = request.into();
        match self.transport.send(&request, method).await {
            Ok(response) => GraphqlResponse::from_http_response(response),
            Err(error) => {
                tracing::warn!("GraphQL request to {} failed: {}", self.config.endpoint(), error);
                GraphqlResponse::runtime_error(error.to_string())
            }
        }
    }

    /// Executes a request and decodes `data` into `T`.
    ///
    /// Decoding failures are reported as runtime-category errors.
    pub async fn execute_typed<T: DeserializeOwned>(
        &self,
        request: impl Into<GraphqlRequest>,
    ) -> GraphqlResponse<T> {
        self.execute(request).await.into_typed()
    }

    /// Executes requests one after another.
    ///
    /// The result has one slot per input, in input order. A failing request
    /// only affects its own slot. Identical requests are sent once.
    pub async fn execute_all<I, R>(&self, requests: I) -> Vec<GraphqlResponse>
    where
        I: IntoIterator<Item = R>,
        R: Into<GraphqlRequest>,
    {
        let (unique, slots) = dedupe(requests);
        let method = self.config.http_method();

        let mut responses = Vec::with_capacity(unique.len());
        for request in unique {
            responses.push(self.execute_with_method(request, method).await);
        }
        fan_out(&responses, &slots)
    }

    /// Executes requests concurrently.
    ///
    /// At most [`max_concurrency`](GraphqlClientConfig::max_concurrency)
    /// requests are in flight at once. The result order matches the input
    /// order, not completion order. A timeout only affects its own slot.
    pub async fn execute_all_async<I, R>(&self, requests: I) -> Vec<GraphqlResponse>
    where
        I: IntoIterator<Item = R>,
        R: Into<GraphqlRequest>,
    {
        let (unique, slots) = dedupe(requests);
        let method = self.config.http_method();

        let responses: Vec<GraphqlResponse> = stream::iter(unique)
            .map(|request| self.execute_with_method(request, method))
            .buffered(self.config.max_concurrency())
            .collect()
            .await;
        fan_out(&responses, &slots)
    }
}

#[async_trait]
impl GraphqlExecutor for GraphqlClient {
    async fn execute(&self, request: GraphqlRequest) -> GraphqlResponse {
        self.execute_with_method(request, self.config.http_method())
            .await
    }
}

/// Collapses identical requests, returning the unique requests and, for every
/// input position, the index of its unique request.
fn dedupe<I, R>(requests: I) -> (Vec<GraphqlRequest>, Vec<usize>)
where
    I: IntoIterator<Item = R>,
    R: Into<GraphqlRequest>,
{
    let mut unique: Vec<GraphqlRequest> = Vec::new();
    let mut slots = Vec::new();

    for request in requests {
        let request = request.into();
        if let Some(index) = unique.iter().position(|known| *known == request) {
            tracing::debug!("Reusing identical query at batch slot {}", slots.len());
            slots.push(index);
        } else {
            slots.push(unique.len());
            unique.push(request);
        }
    }
    (unique, slots)
}

fn fan_out(responses: &[GraphqlResponse], slots: &[usize]) -> Vec<GraphqlResponse> {
    slots.iter().map(|&index| responses[index].clone()).collect()
}
