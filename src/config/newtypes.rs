//! Validated newtype wrappers for configuration values.
//!
//! These wrap the raw strings supplied by the store configuration and reject
//! invalid values on construction.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated GraphQL endpoint URL.
///
/// Only absolute `http` and `https` URLs with a host are accepted.
///
/// # Example
///
/// ```rust
/// use magento_graphql::Endpoint;
///
/// let endpoint = Endpoint::new("https://shop.example.com/graphql").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://shop.example.com/graphql");
/// assert_eq!(endpoint.host_name(), Some("shop.example.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint(reqwest::Url);

impl Endpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyEndpoint`] for blank input and
    /// [`ConfigError::InvalidEndpoint`] when the URL cannot be parsed, uses a
    /// scheme other than http/https, or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim();

        if url.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        let invalid = || ConfigError::InvalidEndpoint {
            url: url.to_string(),
        };
        let parsed = reqwest::Url::parse(url).map_err(|_| invalid())?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(invalid());
        }

        Ok(Self(parsed))
    }

    /// Returns the host name portion of the endpoint.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn url(&self) -> &reqwest::Url {
        &self.0
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Serialize for Endpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated Magento store view code.
///
/// Store codes are sent with every request in the `Store` header and select
/// the store view (language, currency, catalog scope) on the backend.
///
/// # Example
///
/// ```rust
/// use magento_graphql::StoreCode;
///
/// let code = StoreCode::new("default").unwrap();
/// assert_eq!(code.as_ref(), "default");
///
/// assert!(StoreCode::new("en-US").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreCode(String);

impl StoreCode {
    /// Creates a new validated store code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreCode`] unless the code starts with
    /// a lowercase ASCII letter and contains only lowercase letters, digits
    /// and underscores.
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into();

        let mut chars = code.chars();
        let valid_start = chars.next().is_some_and(|c| c.is_ascii_lowercase());
        let valid_rest =
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if !(valid_start && valid_rest) {
            return Err(ConfigError::InvalidStoreCode { code });
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for StoreCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_rejects_empty_string() {
        assert!(matches!(Endpoint::new("  "), Err(ConfigError::EmptyEndpoint)));
    }

    #[test]
    fn test_endpoint_accepts_http_and_https() {
        let endpoint = Endpoint::new("http://localhost:8080/graphql").unwrap();
        assert_eq!(endpoint.host_name(), Some("localhost"));

        let endpoint = Endpoint::new("https://shop.example.com/graphql").unwrap();
        assert_eq!(endpoint.url().scheme(), "https");
    }

    #[test]
    fn test_endpoint_rejects_invalid_urls() {
        assert!(matches!(
            Endpoint::new("shop.example.com/graphql"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            Endpoint::new("ftp://shop.example.com/graphql"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            Endpoint::new("mailto:someone@example.com"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_serde_round_trip() {
        let endpoint = Endpoint::new("https://shop.example.com/graphql").unwrap();
        let json = serde_json::to_string(&endpoint).unwrap();
        assert_eq!(json, r#""https://shop.example.com/graphql""#);

        let restored: Endpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, endpoint);

        let invalid: Result<Endpoint, _> = serde_json::from_str(r#""not a url""#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_store_code_validation() {
        assert!(StoreCode::new("default").is_ok());
        assert!(StoreCode::new("fr_store2").is_ok());

        assert!(StoreCode::new("").is_err());
        assert!(StoreCode::new("2nd").is_err());
        assert!(StoreCode::new("Default").is_err());
        assert!(StoreCode::new("en-us").is_err());
    }
}
