//! Query text with `${name}` placeholders.

use std::fmt;

use serde_json::Value;

use super::TemplateError;
use crate::query::ArgValue;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

/// A query template.
///
/// Each `${name}` placeholder is replaced by the GraphQL literal of the bound
/// value, so strings come out quoted and escaped. `$$` writes a literal `$`;
/// any other `$` is kept as is, which leaves GraphQL variables such as
/// `$sku` untouched.
///
/// # Example
///
/// ```rust
/// use magento_graphql::registry::QueryTemplate;
/// use serde_json::json;
///
/// let template = QueryTemplate::parse(r#"{products(filter:{sku:{eq:${sku}}}){items{name}}}"#).unwrap();
/// let query = template.bind(&json!({"sku": "24-MB01"})).unwrap();
///
/// assert_eq!(query, r#"{products(filter:{sku:{eq:"24-MB01"}}){items{name}}}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryTemplate {
    source: String,
    segments: Vec<Segment>,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'
}

impl QueryTemplate {
    /// Parses template text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Malformed`] for an unterminated or invalid
    /// placeholder.
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            if c != '$' {
                text.push(c);
                continue;
            }
            match chars.peek() {
                Some((_, '$')) => {
                    chars.next();
                    text.push('$');
                }
                Some((_, '{')) => {
                    chars.next();
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Malformed {
                            position,
                            reason: "unterminated placeholder".to_string(),
                        });
                    }
                    if name.is_empty() || !name.chars().all(is_name_char) {
                        return Err(TemplateError::Malformed {
                            position,
                            reason: format!("invalid placeholder name '{name}'"),
                        });
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                _ => text.push('$'),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self { source, segments })
    }

    /// Returns the text the template was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Iterates over placeholder names in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Substitutes every placeholder with the value bound in `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnboundVariable`] for the first placeholder
    /// without a value and [`TemplateError::InvalidValue`] for a value whose
    /// object keys are not GraphQL names. No partial text is returned.
    pub fn bind(&self, variables: &Value) -> Result<String, TemplateError> {
        let mut query = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => query.push_str(text),
                Segment::Placeholder(name) => {
                    let value = variables
                        .get(name)
                        .ok_or_else(|| TemplateError::UnboundVariable { name: name.clone() })?;
                    let value = ArgValue::from(value.clone());
                    value.validate().map_err(|error| TemplateError::InvalidValue {
                        name: name.clone(),
                        reason: error.to_string(),
                    })?;
                    query.push_str(&value.to_string());
                }
            }
        }
        Ok(query)
    }
}

impl fmt::Display for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
