//! HTTP transport for the GraphQL endpoint.
//!
//! This module provides the [`GraphqlTransport`] seam and its default
//! implementation, [`HttpClient`], built on `reqwest`. The transport sends
//! exactly one HTTP request per call; it never retries.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::graphql::GraphqlRequest;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{GraphqlClientConfig, PREVIEW_VERSION_HEADER, STORE_HEADER};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends GraphQL requests to the backend.
///
/// Implementations own connection handling, TLS and any retry policy.
/// [`GraphqlClient`](crate::clients::GraphqlClient) turns every `Err` into a
/// runtime-category error entry.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    /// Sends `request` with the given HTTP method.
    async fn send(
        &self,
        request: &GraphqlRequest,
        method: HttpMethod,
    ) -> Result<HttpResponse, HttpError>;
}

/// `reqwest`-based transport bound to one endpoint.
///
/// Default headers are resolved once from the configuration:
/// `User-Agent`, `Accept`, `Store`, `Preview-Version` and the custom
/// headers that passed the denylist.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a transport for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying `reqwest` client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &GraphqlClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Magento GraphQL Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = config.http_headers().clone();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(store_code) = config.store_code() {
            default_headers.insert(STORE_HEADER.to_string(), store_code.to_string());
        }
        if let Some(version) = config.preview_version() {
            default_headers.insert(PREVIEW_VERSION_HEADER.to_string(), version.to_string());
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(config.accept_self_signed_certificates())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint().url().clone(),
            default_headers,
        })
    }

    /// Returns the endpoint this transport talks to.
    #[must_use]
    pub const fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the endpoint.
    ///
    /// Any status code is returned as a response; only connection-level
    /// failures are errors.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if validation fails and
    /// [`HttpError::Network`] on network errors and timeouts.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(self.endpoint.clone()),
            HttpMethod::Post => self.client.post(self.endpoint.clone()),
        };
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        Ok(HttpResponse::new(
            code,
            res_headers,
            HttpResponse::parse_body(&body_text),
        ))
    }

    /// Builds the HTTP request carrying a GraphQL operation.
    ///
    /// POST sends the JSON envelope as body; GET sends `query`, JSON-encoded
    /// `variables` and `operationName` as URL parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the resulting request is invalid.
    pub fn build_request(
        request: &GraphqlRequest,
        method: HttpMethod,
    ) -> Result<HttpRequest, HttpError> {
        let builder = match method {
            HttpMethod::Post => {
                let body = serde_json::to_value(request)
                    .unwrap_or_else(|_| serde_json::json!({ "query": request.query }));
                HttpRequest::builder(HttpMethod::Post).body(body)
            }
            HttpMethod::Get => {
                let mut builder =
                    HttpRequest::builder(HttpMethod::Get).query_param("query", &request.query);
                if let Some(variables) = &request.variables {
                    builder = builder.query_param("variables", variables.to_string());
                }
                if let Some(name) = &request.operation_name {
                    builder = builder.query_param("operationName", name);
                }
                builder
            }
        };
        Ok(builder.build()?)
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl GraphqlTransport for HttpClient {
    async fn send(
        &self,
        request: &GraphqlRequest,
        method: HttpMethod,
    ) -> Result<HttpResponse, HttpError> {
        let http_request = Self::build_request(request, method)?;
        tracing::debug!(%method, endpoint = %self.endpoint, "Sending GraphQL request");
        self.request(http_request).await
    }
}
