//! Named query templates with scope inheritance.
//!
//! A [`QueryRegistry`] maps scope names (for example a page or component
//! type) to [`QueryTemplate`]s. A scope without its own template inherits
//! the template of its super-type, walking up the chain until one is found.
//!
//! # Example
//!
//! ```rust
//! use magento_graphql::registry::QueryRegistry;
//! use serde_json::json;
//!
//! let mut registry = QueryRegistry::new();
//! registry
//!     .register_source("commerce/product", "{products(filter:{sku:{eq:${sku}}}){items{name}}}")
//!     .unwrap();
//! registry.register_super_type("venia/product", "commerce/product");
//!
//! let query = registry
//!     .resolve_and_bind("venia/product", &json!({"sku": "MH07"}))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(query, r#"{products(filter:{sku:{eq:"MH07"}}){items{name}}}"#);
//! ```

mod template;

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use thiserror::Error;

use crate::clients::{GraphqlExecutor, GraphqlRequest, GraphqlResponse};

pub use template::QueryTemplate;

/// Error raised while parsing or binding a template.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder has no bound value.
    #[error("No value bound for placeholder '{name}'")]
    UnboundVariable {
        /// The placeholder name.
        name: String,
    },

    /// A bound value cannot be written into the query text.
    #[error("Value bound to placeholder '{name}' is invalid: {reason}")]
    InvalidValue {
        /// The placeholder name.
        name: String,
        /// What is wrong.
        reason: String,
    },

    /// The template text is invalid.
    #[error("Malformed template at byte {position}: {reason}")]
    Malformed {
        /// Byte offset of the offending `$`.
        position: usize,
        /// What is wrong.
        reason: String,
    },
}

/// Query templates keyed by scope.
#[derive(Clone, Debug, Default)]
pub struct QueryRegistry {
    templates: HashMap<String, QueryTemplate>,
    super_types: HashMap<String, String>,
}

impl QueryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `template` for `scope`, returning the template it replaces.
    pub fn register(
        &mut self,
        scope: impl Into<String>,
        template: QueryTemplate,
    ) -> Option<QueryTemplate> {
        self.templates.insert(scope.into(), template)
    }

    /// Parses `source` and registers it for `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Malformed`] if `source` does not parse; the
    /// registry is left unchanged.
    pub fn register_source(
        &mut self,
        scope: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), TemplateError> {
        let template = QueryTemplate::parse(source)?;
        self.register(scope, template);
        Ok(())
    }

    /// Declares `super_scope` as the super-type of `scope`.
    pub fn register_super_type(&mut self, scope: impl Into<String>, super_scope: impl Into<String>) {
        self.super_types.insert(scope.into(), super_scope.into());
    }

    /// Returns the template for `scope`, inherited if needed.
    ///
    /// Returns `None` when no scope of the chain has a template, including
    /// when the chain loops.
    #[must_use]
    pub fn resolve(&self, scope: &str) -> Option<&QueryTemplate> {
        let mut visited = HashSet::new();
        let mut current = scope;
        loop {
            if let Some(template) = self.templates.get(current) {
                return Some(template);
            }
            if !visited.insert(current) {
                tracing::warn!(scope, "Super-type chain loops without a query template");
                return None;
            }
            current = self.super_types.get(current)?;
        }
    }

    /// Resolves the template for `scope` and binds `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnboundVariable`] if a placeholder has no
    /// value.
    pub fn resolve_and_bind(
        &self,
        scope: &str,
        variables: &Value,
    ) -> Result<Option<String>, TemplateError> {
        self.resolve(scope)
            .map(|template| template.bind(variables))
            .transpose()
    }

    /// Returns the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if no template is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Executes the query registered for `scope`.
///
/// Returns `Ok(None)` without contacting the backend when no template
/// resolves.
///
/// # Errors
///
/// Returns [`TemplateError::UnboundVariable`] before anything is sent if a
/// placeholder has no value.
pub async fn fetch_scoped(
    executor: &dyn GraphqlExecutor,
    registry: &QueryRegistry,
    scope: &str,
    variables: &Value,
) -> Result<Option<GraphqlResponse>, TemplateError> {
    let Some(query) = registry.resolve_and_bind(scope, variables)? else {
        tracing::debug!(scope, "No query template registered for scope");
        return Ok(None);
    };
    Ok(Some(executor.execute(GraphqlRequest::new(query)).await))
}
