//! GraphQL input literals.

use std::fmt::{self, Write as _};

use super::QueryError;

/// A GraphQL input value rendered inline into query text.
///
/// # Example
///
/// ```rust
/// use magento_graphql::query::ArgValue;
///
/// let filter = ArgValue::object([("sku", ArgValue::filter_eq("24-MB01"))]);
/// assert_eq!(filter.to_string(), r#"{sku:{eq:"24-MB01"}}"#);
///
/// let text = ArgValue::from("say \"hi\"\n");
/// assert_eq!(text.to_string(), r#""say \"hi\"\n""#);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// An integer literal.
    Int(i64),
    /// A float literal.
    Float(f64),
    /// A quoted, escaped string literal.
    String(String),
    /// An unquoted enum value, e.g. `ASC`.
    Enum(String),
    /// A variable reference, rendered as `$name`.
    Variable(String),
    /// `[a,b]`
    List(Vec<ArgValue>),
    /// `{key:value}`, in insertion order.
    Object(Vec<(String, ArgValue)>),
}

impl ArgValue {
    /// Builds an object literal from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Builds the `{eq:"value"}` filter condition.
    pub fn filter_eq(value: impl Into<String>) -> Self {
        Self::object([("eq", Self::String(value.into()))])
    }

    /// Builds an enum literal.
    pub fn enum_value(value: impl Into<String>) -> Self {
        Self::Enum(value.into())
    }

    /// Checks that every object key, enum value and variable reference is a
    /// GraphQL name.
    ///
    /// These parts are written into the query text unquoted, so anything
    /// else would corrupt the document.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidName`] for the first offending name.
    pub fn validate(&self) -> Result<(), QueryError> {
        match self {
            Self::Enum(name) | Self::Variable(name) => check_name(name),
            Self::List(items) => items.iter().try_for_each(Self::validate),
            Self::Object(entries) => entries.iter().try_for_each(|(key, value)| {
                check_name(key)?;
                value.validate()
            }),
            Self::Null | Self::Boolean(_) | Self::Int(_) | Self::Float(_) | Self::String(_) => Ok(()),
        }
    }
}

/// Returns `true` if `name` matches `[_A-Za-z][_0-9A-Za-z]*`.
#[must_use]
pub fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

pub(crate) fn check_name(name: &str) -> Result<(), QueryError> {
    if is_graphql_name(name) {
        Ok(())
    } else {
        Err(QueryError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Writes `value` as a GraphQL string literal.
pub(crate) fn write_string_literal(f: &mut impl fmt::Write, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write_string_literal(f, value),
            Self::Enum(value) => f.write_str(value),
            Self::Variable(name) => write!(f, "${name}"),
            Self::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Self::Object(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Boolean(value),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map_or_else(|| Self::Float(number.as_f64().unwrap_or(f64::NAN)), Self::Int),
            serde_json::Value::String(value) => Self::String(value),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(ArgValue::Null.to_string(), "null");
        assert_eq!(ArgValue::from(true).to_string(), "true");
        assert_eq!(ArgValue::from(12_i64).to_string(), "12");
        assert_eq!(ArgValue::from(2.5).to_string(), "2.5");
        assert_eq!(ArgValue::enum_value("ASC").to_string(), "ASC");
        assert_eq!(ArgValue::Variable("sku".to_string()).to_string(), "$sku");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(ArgValue::from(r"a\b").to_string(), r#""a\\b""#);
        assert_eq!(ArgValue::from("tab\there").to_string(), r#""tab\there""#);
        assert_eq!(ArgValue::from("\u{1}").to_string(), r#""\u0001""#);
        assert_eq!(ArgValue::from("café").to_string(), "\"café\"");
    }

    #[test]
    fn test_nested_rendering() {
        let value = ArgValue::object([
            ("ids", ArgValue::List(vec![1_i64.into(), 2_i64.into()])),
            ("name", ArgValue::filter_eq("bag")),
        ]);
        assert_eq!(value.to_string(), r#"{ids:[1,2],name:{eq:"bag"}}"#);
    }

    #[test]
    fn test_from_json_value() {
        let value = ArgValue::from(json!({"a": [1, 2.5, "x", null, false]}));
        assert_eq!(value.to_string(), r#"{a:[1,2.5,"x",null,false]}"#);
    }

    #[test]
    fn test_graphql_names() {
        assert!(is_graphql_name("sku"));
        assert!(is_graphql_name("_private2"));
        assert!(is_graphql_name("category_uid"));
        assert!(!is_graphql_name(""));
        assert!(!is_graphql_name("2fast"));
        assert!(!is_graphql_name("sku:{eq"));
        assert!(!is_graphql_name("with space"));
    }

    #[test]
    fn test_validate_rejects_unquoted_injection() {
        let value = ArgValue::from(json!({"sku": {"eq": "ok \"quoted\" text"}}));
        assert_eq!(value.validate(), Ok(()));

        let value = ArgValue::from(json!({"sku": {"eq": "x"}, "a}){items{sku}} evil: customer{email} x(b": 1}));
        assert!(matches!(value.validate(), Err(QueryError::InvalidName { .. })));

        let nested = ArgValue::List(vec![ArgValue::object([("ok", ArgValue::enum_value("ASC){x"))])]);
        assert_eq!(
            nested.validate(),
            Err(QueryError::InvalidName {
                name: "ASC){x".to_string()
            })
        );
    }
}
