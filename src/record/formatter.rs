//! Display formatters for record fields.

use super::{Record, RecordValue};

/// Turns raw leaf values into display values.
///
/// A formatter is consulted for every scalar field read through
/// [`Record::get`]. Returning `None` keeps the raw value. The whole record is
/// passed along so that a formatter can look at sibling fields, as
/// [`PriceFormatter`] does with the currency.
///
/// Closures with the matching signature implement this trait.
///
/// # Example
///
/// ```rust
/// use magento_graphql::record::{Record, RecordFactory, RecordValue};
/// use serde_json::json;
///
/// let factory = RecordFactory::new().with_formatter(|field: &str, raw: &RecordValue, _: &Record| {
///     (field == "name").then(|| RecordValue::String(raw.to_string().to_uppercase()))
/// });
/// let record = factory.record_from_value(json!({"name": "bag", "sku": "b-1"})).unwrap();
///
/// assert_eq!(record.get("name").as_str(), Some("BAG"));
/// assert_eq!(record.get("sku").as_str(), Some("b-1"));
/// ```
pub trait Formatter: Send + Sync {
    /// Returns the display value for `field`, or `None` to keep `raw`.
    fn format(&self, field: &str, raw: &RecordValue, record: &Record) -> Option<RecordValue>;
}

impl<F> Formatter for F
where
    F: Fn(&str, &RecordValue, &Record) -> Option<RecordValue> + Send + Sync,
{
    fn format(&self, field: &str, raw: &RecordValue, record: &Record) -> Option<RecordValue> {
        self(field, raw, record)
    }
}

/// Formats money amounts using the sibling currency field.
///
/// Only records holding both a numeric amount field and a string currency
/// field are touched, so a single formatter can be shared by a whole record
/// tree.
///
/// # Example
///
/// ```rust
/// use magento_graphql::record::PriceFormatter;
///
/// let formatter = PriceFormatter::new();
/// assert_eq!(formatter.format_amount(19.99, "USD"), "$19.99");
/// assert_eq!(formatter.format_amount(1234.5, "EUR"), "€1,234.50");
/// assert_eq!(formatter.format_amount(1500.0, "JPY"), "¥1,500");
/// assert_eq!(formatter.format_amount(19.99, "CHF"), "19.99 CHF");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceFormatter {
    amount_field: String,
    currency_field: String,
}

impl Default for PriceFormatter {
    fn default() -> Self {
        Self {
            amount_field: "value".to_string(),
            currency_field: "currency".to_string(),
        }
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    let symbol = match currency {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "CAD" => "CA$",
        "AUD" => "A$",
        "INR" => "₹",
        "KRW" => "₩",
        "BRL" => "R$",
        _ => return None,
    };
    Some(symbol)
}

fn fraction_digits(currency: &str) -> usize {
    match currency {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl PriceFormatter {
    /// Creates a formatter for `value` / `currency` pairs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter for custom field names.
    #[must_use]
    pub fn with_fields(amount_field: impl Into<String>, currency_field: impl Into<String>) -> Self {
        Self {
            amount_field: amount_field.into(),
            currency_field: currency_field.into(),
        }
    }

    /// Formats `amount` in `currency`.
    ///
    /// Known currencies get their symbol as prefix; other codes are appended
    /// after the amount.
    #[must_use]
    pub fn format_amount(&self, amount: f64, currency: &str) -> String {
        let digits = fraction_digits(currency);
        let fixed = format!("{:.digits$}", amount.abs());
        let (whole, fraction) = fixed
            .split_once('.')
            .map_or((fixed.as_str(), None), |(whole, fraction)| (whole, Some(fraction)));
        let mut number = group_thousands(whole);
        if let Some(fraction) = fraction {
            number.push('.');
            number.push_str(fraction);
        }
        let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };

        match currency_symbol(currency) {
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{sign}{number} {currency}"),
        }
    }
}

impl Formatter for PriceFormatter {
    fn format(&self, field: &str, raw: &RecordValue, record: &Record) -> Option<RecordValue> {
        if field != self.amount_field {
            return None;
        }
        let amount = raw.as_f64()?;
        let currency = record.get_raw(&self.currency_field)?.as_str()?;
        Some(RecordValue::String(self.format_amount(amount, currency)))
    }
}
