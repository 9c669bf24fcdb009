//! Integration tests for the GraphQL client against a mock backend.
//!
//! These tests verify the HTTP exchange (method, body, parameters, headers)
//! and the error categorization of single requests and batches.

use std::time::Duration;

use magento_graphql::{
    Endpoint, GraphqlClient, GraphqlClientConfig, GraphqlRequest, HttpMethod, StoreCode,
    RUNTIME_ERROR_CATEGORY,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client for the mock server.
fn create_client(server: &MockServer) -> GraphqlClient {
    let config = GraphqlClientConfig::builder()
        .endpoint(Endpoint::new(format!("{}/graphql", server.uri())).unwrap())
        .store_code(StoreCode::new("default").unwrap())
        .http_header_entries(["X-Tenant=acme", "Authorization=Bearer secret"])
        .request_timeout(Duration::from_millis(300))
        .build()
        .unwrap();
    GraphqlClient::new(config).unwrap()
}

fn data(value: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": value }))
}

// ============================================================================
// HTTP Exchange Tests
// ============================================================================

#[tokio::test]
async fn test_post_sends_json_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({
            "query": "query Store($x:Int){storeConfig{store_code}}",
            "variables": {"x": 1},
            "operationName": "Store"
        })))
        .respond_with(data(json!({"storeConfig": {"store_code": "default"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client
        .execute(
            GraphqlRequest::new("query Store($x:Int){storeConfig{store_code}}")
                .with_variables(json!({"x": 1}))
                .with_operation_name("Store"),
        )
        .await;

    assert!(response.is_ok());
    assert_eq!(
        response.data,
        Some(json!({"storeConfig": {"store_code": "default"}}))
    );
}

#[tokio::test]
async fn test_get_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/graphql"))
        .and(query_param("query", "{currency{base_currency_code}}"))
        .respond_with(data(json!({"currency": {"base_currency_code": "USD"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client
        .execute_with_method("{currency{base_currency_code}}", HttpMethod::Get)
        .await;

    assert!(response.is_ok());
    assert_eq!(response.data.unwrap()["currency"]["base_currency_code"], "USD");
}

#[tokio::test]
async fn test_store_and_custom_headers_are_sent_but_denylisted_ones_are_not() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Store", "default"))
        .and(header("X-Tenant", "acme"))
        .and(header("Content-Type", "application/json"))
        .respond_with(data(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client.execute("{storeConfig{store_code}}").await;
    assert!(response.is_ok());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let authorization_sent = requests[0]
        .headers
        .iter()
        .any(|(name, _)| name.as_str().eq_ignore_ascii_case("authorization"));
    assert!(!authorization_sent);
}

// ============================================================================
// Error Categorization Tests
// ============================================================================

#[tokio::test]
async fn test_backend_errors_keep_their_category() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"products": null},
            "errors": [{
                "message": "Variable \"$sku\" is never used.",
                "extensions": {"category": "graphql"}
            }, {
                "message": "The current customer isn't authorized.",
                "extensions": {"category": "graphql-authorization"}
            }]
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client.execute("{products{items{sku}}}").await;

    assert!(!response.has_transport_errors());
    let categories: Vec<&str> = response
        .errors
        .iter()
        .map(|error| error.category.as_str())
        .collect();
    assert_eq!(categories, vec!["graphql", "graphql-authorization"]);
}

#[tokio::test]
async fn test_error_page_becomes_runtime_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client.execute("{a}").await;

    assert!(response.data.is_none());
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].category, RUNTIME_ERROR_CATEGORY);
    assert!(response.errors[0].message.starts_with("HTTP 502"));
}

#[tokio::test]
async fn test_unreachable_backend_becomes_runtime_error() {
    let config = GraphqlClientConfig::builder()
        .endpoint(Endpoint::new("http://127.0.0.1:9/graphql").unwrap())
        .request_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let client = GraphqlClient::new(config).unwrap();

    let response = client.execute("{a}").await;

    assert!(response.data.is_none());
    assert!(response.has_transport_errors());
}

// ============================================================================
// Batch Tests
// ============================================================================

#[tokio::test]
async fn test_timeout_in_batch_does_not_affect_other_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("slow"))
        .respond_with(data(json!({"slow": 1})).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("fast"))
        .respond_with(data(json!({"fast": 1})))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let responses = client.execute_all_async(["{slow}", "{fast}", "{fast b}"]).await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0].errors[0].category, RUNTIME_ERROR_CATEGORY);
    assert!(responses[0].data.is_none());
    assert_eq!(responses[1].data, Some(json!({"fast": 1})));
    assert!(responses[2].is_ok());
}

#[tokio::test]
async fn test_identical_requests_are_sent_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"query": "{storeConfig{store_code}}"})))
        .respond_with(data(json!({"storeConfig": {"store_code": "default"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(json!({"query": "{currency{base_currency_code}}"})))
        .respond_with(data(json!({"currency": {"base_currency_code": "EUR"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let responses = client
        .execute_all([
            "{storeConfig{store_code}}",
            "{currency{base_currency_code}}",
            "{storeConfig{store_code}}",
        ])
        .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0], responses[2]);
    assert_eq!(responses[1].data.as_ref().unwrap()["currency"]["base_currency_code"], "EUR");
}

#[tokio::test]
async fn test_empty_batch_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(data(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let requests: Vec<GraphqlRequest> = Vec::new();

    assert!(client.execute_all_async(requests).await.is_empty());
}

#[test]
fn test_graphql_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
}
