//! HTTP response type for the GraphQL transport.

use std::collections::HashMap;

/// A raw HTTP response from the GraphQL endpoint.
///
/// The body is parsed as JSON when possible; a body that is not JSON is kept
/// as `{"raw_body": "<text>"}` so error reporting can still show it.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Parses a response body from its text.
    #[must_use]
    pub fn parse_body(text: &str) -> serde_json::Value {
        if text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw_body": text }))
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` if the body looks like a GraphQL response envelope.
    #[must_use]
    pub fn has_graphql_envelope(&self) -> bool {
        self.body
            .as_object()
            .is_some_and(|body| body.contains_key("data") || body.contains_key("errors"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_only_for_2xx() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(299, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(400, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_parse_body_handles_empty_and_non_json() {
        assert_eq!(HttpResponse::parse_body(""), json!({}));
        assert_eq!(HttpResponse::parse_body(r#"{"data":null}"#), json!({"data": null}));
        assert_eq!(
            HttpResponse::parse_body("<html>oops</html>"),
            json!({"raw_body": "<html>oops</html>"})
        );
    }

    #[test]
    fn test_request_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123".to_string()]);

        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.request_id(), Some("abc-123"));
    }

    #[test]
    fn test_graphql_envelope_detection() {
        let envelope = HttpResponse::new(200, HashMap::new(), json!({"data": {"a": 1}}));
        assert!(envelope.has_graphql_envelope());

        let errors_only = HttpResponse::new(200, HashMap::new(), json!({"errors": []}));
        assert!(errors_only.has_graphql_envelope());

        let other = HttpResponse::new(502, HashMap::new(), json!({"raw_body": "Bad Gateway"}));
        assert!(!other.has_graphql_envelope());
    }
}
