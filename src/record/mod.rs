//! Generic records for rendering layers.
//!
//! A [`Record`] exposes an entity as a tree of named values, so templates can
//! read any field, including fields added by query hooks, without knowing the
//! typed model. Records built by a [`RecordFactory`] share its [`Formatter`],
//! which turns raw leaf values into display values on read.
//!
//! # Example
//!
//! ```rust
//! use magento_graphql::record::{PriceFormatter, RecordFactory};
//! use serde_json::json;
//!
//! let factory = RecordFactory::new().with_formatter(PriceFormatter::new());
//! let record = factory
//!     .record_from_value(json!({
//!         "name": "Joust Duffle Bag",
//!         "price": {"value": 19.99, "currency": "USD"}
//!     }))
//!     .unwrap();
//!
//! assert_eq!(record.path(&["price", "value"]).as_str(), Some("$19.99"));
//! assert_eq!(record.get("name").as_str(), Some("Joust Duffle Bag"));
//! assert!(record.get("missing").is_null());
//! ```

mod formatter;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use formatter::{Formatter, PriceFormatter};

/// Error raised while building a record.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The source value could not be serialized.
    #[error("Failed to serialize record source: {0}")]
    Serialization(String),

    /// The source value is not an object.
    #[error("Record source must be an object, found {found}")]
    NotAnObject {
        /// The JSON kind that was found.
        found: &'static str,
    },
}

/// A field value of a [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub enum RecordValue {
    /// No value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(serde_json::Number),
    /// A string.
    String(String),
    /// A list of values.
    List(Vec<RecordValue>),
    /// A nested record.
    Record(Record),
}

impl RecordValue {
    /// Returns `true` for [`RecordValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the number as `f64`, if this is one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    /// Returns the number as `i64`, if this is an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the nested record, if this is one.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the list, if this is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the raw JSON form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(number) => Value::Number(number.clone()),
            Self::String(value) => Value::String(value.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Record(record) => record.to_json(),
        }
    }

    const fn is_leaf(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Number(_) | Self::String(_))
    }
}

/// Renders the value for display: strings without quotes, `Null` as an
/// empty string, lists and records as JSON.
impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::String(value) => f.write_str(value),
            Self::List(_) | Self::Record(_) => write!(f, "{}", self.to_json()),
        }
    }
}

/// A named, ordered set of values.
#[derive(Clone, Default)]
pub struct Record {
    fields: IndexMap<String, RecordValue>,
    formatter: Option<Arc<dyn Formatter>>,
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("fields", &self.fields)
            .field("formatted", &self.formatter.is_some())
            .finish()
    }
}

/// Records compare by their raw fields.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Record {
    /// Returns the display value of `field`.
    ///
    /// Absent fields read as [`RecordValue::Null`]. Scalar values go through
    /// the formatter, if any; lists and records are returned raw.
    #[must_use]
    pub fn get(&self, field: &str) -> Cow<'_, RecordValue> {
        let Some(raw) = self.fields.get(field) else {
            return Cow::Owned(RecordValue::Null);
        };
        if raw.is_leaf() {
            if let Some(formatted) = self
                .formatter
                .as_ref()
                .and_then(|formatter| formatter.format(field, raw, self))
            {
                return Cow::Owned(formatted);
            }
        }
        Cow::Borrowed(raw)
    }

    /// Returns the unformatted value of `field`.
    #[must_use]
    pub fn get_raw(&self, field: &str) -> Option<&RecordValue> {
        self.fields.get(field)
    }

    /// Follows `path` through nested records and returns the display value
    /// of the last field.
    #[must_use]
    pub fn path(&self, path: &[&str]) -> Cow<'_, RecordValue> {
        let Some((last, parents)) = path.split_last() else {
            return Cow::Owned(RecordValue::Null);
        };
        let mut record = self;
        for field in parents {
            match record.get_raw(field).and_then(RecordValue::as_record) {
                Some(nested) => record = nested,
                None => return Cow::Owned(RecordValue::Null),
            }
        }
        record.get(last)
    }

    /// Returns `true` if `field` is present.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates over field names in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over raw fields in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` if a formatter is attached.
    #[must_use]
    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }

    /// Returns the raw JSON form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds records sharing one formatter.
#[derive(Clone, Default)]
pub struct RecordFactory {
    formatter: Option<Arc<dyn Formatter>>,
}

impl fmt::Debug for RecordFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordFactory")
            .field("formatted", &self.formatter.is_some())
            .finish()
    }
}

impl RecordFactory {
    /// Creates a factory without formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `formatter` to every record this factory builds.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Builds a record from any serializable entity.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Serialization`] if the entity cannot be
    /// serialized and [`RecordError::NotAnObject`] if it is not a map.
    pub fn record_from<T: Serialize + ?Sized>(&self, entity: &T) -> Result<Record, RecordError> {
        let value = serde_json::to_value(entity)
            .map_err(|error| RecordError::Serialization(error.to_string()))?;
        self.record_from_value(value)
    }

    /// Builds a record from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotAnObject`] if `value` is not an object.
    pub fn record_from_value(&self, value: Value) -> Result<Record, RecordError> {
        match value {
            Value::Object(map) => Ok(self.build(map)),
            other => Err(RecordError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Builds one record per entity.
    ///
    /// # Errors
    ///
    /// Returns the first entity's error.
    pub fn records_from<T: Serialize>(&self, entities: &[T]) -> Result<Vec<Record>, RecordError> {
        entities.iter().map(|entity| self.record_from(entity)).collect()
    }

    fn build(&self, map: serde_json::Map<String, Value>) -> Record {
        Record {
            fields: map
                .into_iter()
                .map(|(key, value)| (key, self.value(value)))
                .collect(),
            formatter: self.formatter.clone(),
        }
    }

    fn value(&self, value: Value) -> RecordValue {
        match value {
            Value::Null => RecordValue::Null,
            Value::Bool(value) => RecordValue::Bool(value),
            Value::Number(number) => RecordValue::Number(number),
            Value::String(value) => RecordValue::String(value),
            Value::Array(items) => {
                RecordValue::List(items.into_iter().map(|item| self.value(item)).collect())
            }
            Value::Object(map) => RecordValue::Record(self.build(map)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use serde_json::json;

    fn product() -> Product {
        serde_json::from_value(json!({
            "sku": "24-MB01",
            "name": "Joust Duffle Bag",
            "price_range": {
                "minimum_price": {"final_price": {"value": 19.99, "currency": "USD"}}
            },
            "meta_title": "Duffle"
        }))
        .unwrap()
    }

    const FINAL_PRICE: [&str; 4] = ["price_range", "minimum_price", "final_price", "value"];

    #[test]
    fn test_price_is_formatted_through_nested_records() {
        let factory = RecordFactory::new().with_formatter(PriceFormatter::new());
        let record = factory.record_from(&product()).unwrap();

        assert_eq!(record.path(&FINAL_PRICE).as_str(), Some("$19.99"));

        let price = record.path(&FINAL_PRICE[..3]);
        let raw = price.as_record().unwrap().get_raw("value");
        assert_eq!(raw.and_then(RecordValue::as_f64), Some(19.99));
    }

    #[test]
    fn test_raw_value_without_formatter() {
        let record = RecordFactory::new().record_from(&product()).unwrap();

        assert!(!record.has_formatter());
        assert_eq!(record.path(&FINAL_PRICE).as_f64(), Some(19.99));
    }

    #[test]
    fn test_extension_fields_are_readable() {
        let record = RecordFactory::new().record_from(&product()).unwrap();

        assert_eq!(record.get("meta_title").as_str(), Some("Duffle"));
        assert!(record.contains("sku"));
        assert!(!record.contains("url_key"));
        assert!(record.get("url_key").is_null());
    }

    #[test]
    fn test_nested_lists_and_records() {
        let record = RecordFactory::new()
            .record_from_value(json!({"b": 1, "a": 2, "c": [1, {"d": true}]}))
            .unwrap();

        let list = record.get("c");
        let items = list.as_list().unwrap();
        assert_eq!(items[1].as_record().unwrap().get("d").as_bool(), Some(true));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_amount_without_currency_is_left_raw() {
        let factory = RecordFactory::new().with_formatter(PriceFormatter::new());
        let record = factory
            .record_from_value(json!({"value": 3, "label": "x"}))
            .unwrap();

        assert_eq!(record.get("value").as_i64(), Some(3));
    }

    #[test]
    fn test_custom_field_names() {
        let factory =
            RecordFactory::new().with_formatter(PriceFormatter::with_fields("amount", "code"));
        let record = factory
            .record_from_value(json!({"amount": 1234.5, "code": "GBP"}))
            .unwrap();

        assert_eq!(record.get("amount").as_str(), Some("£1,234.50"));
    }

    #[test]
    fn test_non_object_sources_are_rejected() {
        let factory = RecordFactory::new();

        assert_eq!(
            factory.record_from_value(json!([1, 2])).unwrap_err(),
            RecordError::NotAnObject { found: "array" }
        );
        assert_eq!(
            factory.record_from(&"text").unwrap_err(),
            RecordError::NotAnObject { found: "string" }
        );
    }

    #[test]
    fn test_records_from_list() {
        let records = RecordFactory::new()
            .records_from(&[product(), product()])
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[test]
    fn test_display_and_json() {
        let record = RecordFactory::new()
            .record_from_value(json!({"s": "x", "n": null, "l": [1]}))
            .unwrap();

        assert_eq!(record.get("s").to_string(), "x");
        assert_eq!(record.get("n").to_string(), "");
        assert_eq!(record.get("l").to_string(), "[1]");
        assert_eq!(record.to_json(), json!({"s": "x", "n": null, "l": [1]}));
    }
}
