//! Custom HTTP header handling for client configuration.
//!
//! Store configurations may attach custom headers to every GraphQL request.
//! Headers owned by the HTTP protocol or by the client itself are on a
//! denylist and are dropped when the configuration is built.

use std::collections::HashMap;

/// Header carrying the Magento store view code.
pub const STORE_HEADER: &str = "Store";

/// Header carrying the content preview version.
pub const PREVIEW_VERSION_HEADER: &str = "Preview-Version";

/// Header names that custom configuration may never set.
///
/// Matching is case-insensitive.
pub const DENYLISTED_HEADERS: &[&str] = &[
    "Accept",
    "Accept-Charset",
    "Accept-Datetime",
    "Accept-Encoding",
    "Accept-Language",
    "Access-Control-Request-Headers",
    "Access-Control-Request-Method",
    "Authorization",
    "Cache-Control",
    "Connection",
    "Content-Encoding",
    "Content-Length",
    "Content-MD5",
    "Content-Type",
    "Cookie",
    "Date",
    "Expect",
    "Forwarded",
    "From",
    "Host",
    "HTTP2-Settings",
    "If-Match",
    "If-Modified-Since",
    "If-None-Match",
    "If-Range",
    "If-Unmodified-Since",
    "Max-Forwards",
    "Origin",
    "Pragma",
    "Proxy-Authorization",
    "Range",
    "Referer",
    "TE",
    "Trailer",
    "Transfer-Encoding",
    "Upgrade",
    "User-Agent",
    "Via",
    "Warning",
    STORE_HEADER,
    PREVIEW_VERSION_HEADER,
];

/// Returns `true` if `name` may not be set through custom configuration.
///
/// # Example
///
/// ```rust
/// use magento_graphql::config::is_denylisted_header;
///
/// assert!(is_denylisted_header("authorization"));
/// assert!(!is_denylisted_header("X-Custom-Header"));
/// ```
#[must_use]
pub fn is_denylisted_header(name: &str) -> bool {
    let name = name.trim();
    DENYLISTED_HEADERS
        .iter()
        .any(|denied| denied.eq_ignore_ascii_case(name))
}

/// Parses a `name=value` header entry as stored in content configuration.
///
/// The value may itself contain `=`; only the first one separates name from
/// value. Returns `None` for entries without a separator or with an empty name.
#[must_use]
pub fn parse_header_entry(entry: &str) -> Option<(String, String)> {
    let (name, value) = entry.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// Drops denylisted headers from `headers`.
///
/// Dropping is silent towards the caller; each removal is logged at debug level.
pub(crate) fn filter_denylisted(headers: HashMap<String, String>) -> HashMap<String, String> {
    headers
        .into_iter()
        .filter(|(name, _)| {
            let denied = is_denylisted_header(name);
            if denied {
                tracing::debug!("Ignoring custom HTTP header '{}': header is reserved", name);
            }
            !denied
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denylist_is_case_insensitive() {
        assert!(is_denylisted_header("Authorization"));
        assert!(is_denylisted_header("AUTHORIZATION"));
        assert!(is_denylisted_header(" cache-control "));
        assert!(is_denylisted_header("store"));
        assert!(is_denylisted_header("preview-version"));
    }

    #[test]
    fn test_custom_headers_are_not_denylisted() {
        assert!(!is_denylisted_header("X-Magento-Cache-Id"));
        assert!(!is_denylisted_header("Content-Currency"));
    }

    #[test]
    fn test_parse_header_entry() {
        assert_eq!(
            parse_header_entry("X-Custom=value"),
            Some(("X-Custom".to_string(), "value".to_string()))
        );
        assert_eq!(
            parse_header_entry(" X-Token = a=b "),
            Some(("X-Token".to_string(), "a=b".to_string()))
        );
        assert_eq!(
            parse_header_entry("X-Empty="),
            Some(("X-Empty".to_string(), String::new()))
        );
        assert_eq!(parse_header_entry("no-separator"), None);
        assert_eq!(parse_header_entry("=value"), None);
    }

    #[test]
    fn test_filter_denylisted_keeps_only_allowed_headers() {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer x".to_string());
        headers.insert("x-custom".to_string(), "1".to_string());
        headers.insert("Host".to_string(), "evil.example.com".to_string());

        let filtered = filter_denylisted(headers);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.get("x-custom"), Some(&"1".to_string()));
    }
}
