//! GraphQL response envelope and categorized errors.
//!
//! Every execution yields a [`GraphqlResponse`]. Failures are never thrown:
//! errors reported by the backend keep their own category, failures on the
//! client side (network, timeout, undecodable payloads) are reported under
//! [`RUNTIME_ERROR_CATEGORY`]. Callers can therefore render partial data next
//! to partial errors.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::{HttpResponse, HttpResponseError};
use crate::model::null_as_default;

/// Category of errors raised on the client side rather than by the backend.
pub const RUNTIME_ERROR_CATEGORY: &str = "RuntimeException";

/// Category used for backend errors that carry no `extensions.category`.
pub const DEFAULT_ERROR_CATEGORY: &str = "graphql";

/// Where an error came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend returned a well-formed GraphQL error.
    Backend,
    /// The backend could not be reached or its answer could not be read.
    Transport,
}

/// A position in the query document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

/// A single categorized error entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseError {
    /// Human-readable message.
    pub message: String,
    /// Error classification, e.g. `graphql-no-such-entity` or
    /// [`RUNTIME_ERROR_CATEGORY`].
    pub category: String,
    /// Response path the error applies to.
    pub path: Vec<serde_json::Value>,
    /// Locations in the query document.
    pub locations: Vec<ErrorLocation>,
}

impl ResponseError {
    /// Creates a backend error with the given category.
    #[must_use]
    pub fn new(message: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: category.into(),
            path: Vec::new(),
            locations: Vec::new(),
        }
    }

    /// Creates a client-side error.
    #[must_use]
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(message, RUNTIME_ERROR_CATEGORY)
    }

    /// Returns where the error came from.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        if self.category == RUNTIME_ERROR_CATEGORY {
            ErrorKind::Transport
        } else {
            ErrorKind::Backend
        }
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

#[derive(Deserialize)]
struct WireError {
    #[serde(default, deserialize_with = "null_as_default")]
    message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    path: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    locations: Vec<ErrorLocation>,
    #[serde(default)]
    extensions: Option<WireExtensions>,
}

#[derive(Deserialize)]
struct WireExtensions {
    category: Option<String>,
}

impl From<WireError> for ResponseError {
    fn from(error: WireError) -> Self {
        let category = error
            .extensions
            .and_then(|extensions| extensions.category)
            .unwrap_or_else(|| DEFAULT_ERROR_CATEGORY.to_string());
        Self {
            message: error.message,
            category,
            path: error.path,
            locations: error.locations,
        }
    }
}

#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<WireError>,
    #[serde(default)]
    extensions: Option<serde_json::Value>,
}

/// The outcome of one GraphQL execution.
///
/// `data` and `errors` may both be present (partial success).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphqlResponse<T = serde_json::Value> {
    /// The decoded `data` member, if any.
    pub data: Option<T>,
    /// Categorized errors, possibly empty.
    pub errors: Vec<ResponseError>,
    /// The raw `extensions` member, if any.
    pub extensions: Option<serde_json::Value>,
}

impl<T> GraphqlResponse<T> {
    /// Creates a successful response.
    #[must_use]
    pub const fn from_data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
            extensions: None,
        }
    }

    /// Creates a response holding only errors.
    #[must_use]
    pub const fn from_errors(errors: Vec<ResponseError>) -> Self {
        Self {
            data: None,
            errors,
            extensions: None,
        }
    }

    /// Creates a response holding one client-side error.
    #[must_use]
    pub fn runtime_error(message: impl Into<String>) -> Self {
        Self::from_errors(vec![ResponseError::runtime(message)])
    }

    /// Returns `true` if the response carries no errors.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if any error came from the client side.
    #[must_use]
    pub fn has_transport_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|error| error.kind() == ErrorKind::Transport)
    }
}

impl GraphqlResponse<serde_json::Value> {
    /// Builds a response from a raw HTTP response.
    ///
    /// A body with a GraphQL envelope is decoded whatever the status code;
    /// anything else becomes a runtime error.
    #[must_use]
    pub fn from_http_response(response: HttpResponse) -> Self {
        if response.has_graphql_envelope() {
            return Self::from_body(response.body);
        }

        if response.is_ok() {
            return Self::runtime_error("Response body is not a GraphQL response");
        }

        let error_reference = response.request_id().map(String::from);
        let message = response
            .body
            .get("raw_body")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| response.body.to_string(), String::from);
        let error = HttpResponseError {
            code: response.code,
            message,
            error_reference,
        };
        Self::runtime_error(error.to_string())
    }

    /// Decodes a GraphQL response envelope.
    #[must_use]
    pub fn from_body(body: serde_json::Value) -> Self {
        match serde_json::from_value::<WireEnvelope>(body) {
            Ok(envelope) => Self {
                data: envelope.data.filter(|data| !data.is_null()),
                errors: envelope.errors.into_iter().map(Into::into).collect(),
                extensions: envelope.extensions,
            },
            Err(error) => Self::runtime_error(format!("Malformed GraphQL response: {error}")),
        }
    }

    /// Decodes `data` into a typed payload.
    ///
    /// A decoding failure drops the data and appends a runtime error, keeping
    /// any errors already present.
    #[must_use]
    pub fn into_typed<U: DeserializeOwned>(self) -> GraphqlResponse<U> {
        let mut errors = self.errors;
        let data = match self.data.map(serde_json::from_value::<U>) {
            Some(Ok(data)) => Some(data),
            Some(Err(error)) => {
                errors.push(ResponseError::runtime(format!(
                    "Failed to decode GraphQL data: {error}"
                )));
                None
            }
            None => None,
        };
        GraphqlResponse {
            data,
            errors,
            extensions: self.extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_backend_errors_keep_their_category() {
        let response = GraphqlResponse::from_body(json!({
            "data": {"products": null},
            "errors": [{
                "message": "The product that was requested doesn't exist.",
                "path": ["products"],
                "locations": [{"line": 1, "column": 2}],
                "extensions": {"category": "graphql-no-such-entity"}
            }]
        }));

        assert_eq!(response.data, Some(json!({"products": null})));
        assert_eq!(response.errors.len(), 1);
        let error = &response.errors[0];
        assert_eq!(error.category, "graphql-no-such-entity");
        assert_eq!(error.kind(), ErrorKind::Backend);
        assert_eq!(error.path, vec![json!("products")]);
        assert_eq!(error.locations, vec![ErrorLocation { line: 1, column: 2 }]);
    }

    #[test]
    fn test_backend_error_without_category_uses_default() {
        let response = GraphqlResponse::from_body(json!({
            "errors": [{"message": "Syntax Error"}]
        }));

        assert!(response.data.is_none());
        assert_eq!(response.errors[0].category, DEFAULT_ERROR_CATEGORY);
    }

    #[test]
    fn test_null_data_is_treated_as_absent() {
        let response = GraphqlResponse::from_body(json!({"data": null}));
        assert!(response.data.is_none());
        assert!(response.is_ok());
    }

    #[test]
    fn test_non_envelope_error_status_becomes_runtime_error() {
        let response = GraphqlResponse::from_http_response(HttpResponse::new(
            503,
            HashMap::new(),
            json!({"raw_body": "Service Unavailable"}),
        ));

        assert!(response.data.is_none());
        assert!(response.has_transport_errors());
        assert_eq!(response.errors[0].category, RUNTIME_ERROR_CATEGORY);
        assert_eq!(response.errors[0].message, "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_envelope_with_error_status_is_still_decoded() {
        let response = GraphqlResponse::from_http_response(HttpResponse::new(
            500,
            HashMap::new(),
            json!({"errors": [{"message": "Internal", "extensions": {"category": "internal"}}]}),
        ));

        assert_eq!(response.errors[0].category, "internal");
        assert!(!response.has_transport_errors());
    }

    #[test]
    fn test_into_typed_reports_decode_failure_as_runtime_error() {
        #[derive(Debug, Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            count: u32,
        }

        let ok = GraphqlResponse::from_data(json!({"count": 3})).into_typed::<Shape>();
        assert!(ok.is_ok());
        assert!(ok.data.is_some());

        let bad = GraphqlResponse::from_data(json!({"count": "three"})).into_typed::<Shape>();
        assert!(bad.data.is_none());
        assert_eq!(bad.errors.len(), 1);
        assert_eq!(bad.errors[0].kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_response_error_display() {
        let error = ResponseError::new("Not found", "graphql-no-such-entity");
        assert_eq!(error.to_string(), "[graphql-no-such-entity] Not found");
    }

    #[test]
    fn test_null_members_keep_partial_data_and_backend_category() {
        let response = GraphqlResponse::from_body(json!({
            "data": {"products": {"items": []}},
            "errors": [{
                "message": "The current customer isn't authorized.",
                "path": null,
                "locations": null,
                "extensions": {"category": "graphql-authorization"}
            }]
        }));

        assert_eq!(response.data, Some(json!({"products": {"items": []}})));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].category, "graphql-authorization");
        assert!(response.errors[0].path.is_empty());
        assert!(response.errors[0].locations.is_empty());

        let clean = GraphqlResponse::from_body(json!({"data": {"a": 1}, "errors": null}));
        assert!(clean.is_ok());
        assert_eq!(clean.data, Some(json!({"a": 1})));
    }
}
