//! GraphQL request type.

use serde::Serialize;

/// A GraphQL operation to execute: query text plus optional variables.
///
/// Serializes to the standard `{query, variables, operationName}` envelope.
///
/// # Example
///
/// ```rust
/// use magento_graphql::GraphqlRequest;
/// use serde_json::json;
///
/// let request = GraphqlRequest::new("query P($sku: String) { products(filter: {sku: {eq: $sku}}) { total_count } }")
///     .with_variables(json!({"sku": "24-MB01"}))
///     .with_operation_name("P");
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["variables"]["sku"], "24-MB01");
/// assert_eq!(body["operationName"], "P");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphqlRequest {
    /// The query document.
    pub query: String,
    /// Variables for the query, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
    /// The operation to run when the document has several.
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    /// Creates a request without variables.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    /// Attaches variables to the request.
    #[must_use]
    pub fn with_variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

impl From<&str> for GraphqlRequest {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for GraphqlRequest {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_variables_omits_optional_fields() {
        let body = serde_json::to_value(GraphqlRequest::new("{a}")).unwrap();
        assert_eq!(body, json!({"query": "{a}"}));
    }

    #[test]
    fn test_requests_compare_by_query_and_variables() {
        let a = GraphqlRequest::new("{a}").with_variables(json!({"x": 1}));
        let b = GraphqlRequest::new("{a}").with_variables(json!({"x": 1}));
        let c = GraphqlRequest::new("{a}").with_variables(json!({"x": 2}));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, GraphqlRequest::from("{a}"));
    }
}
