//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base URL for the authentication service.
///
/// This newtype ensures the base URL is an absolute `http` or `https` URL and
/// normalizes it by stripping a trailing slash, so endpoint paths can always
/// be appended with a single separator.
///
/// # Accepted Formats
///
/// - `https://portal.example.com/api/auth`
/// - `http://localhost:5000/api/auth/` - trailing slash is stripped
///
/// # Serialization
///
/// `BaseUrl` serializes to and deserializes from the normalized URL string:
///
/// ```rust
/// use brainex_auth::BaseUrl;
///
/// let url = BaseUrl::new("https://portal.example.com/api/auth/").unwrap();
/// let json = serde_json::to_string(&url).unwrap();
/// assert_eq!(json, r#""https://portal.example.com/api/auth""#);
/// ```
///
/// # Example
///
/// ```rust
/// use brainex_auth::BaseUrl;
///
/// let url = BaseUrl::new("https://portal.example.com/api/auth").unwrap();
/// assert_eq!(url.as_ref(), "https://portal.example.com/api/auth");
///
/// assert!(BaseUrl::new("portal.example.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is empty, is not
    /// absolute, or does not use the `http` or `https` scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        let valid = rest.is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'));
        if !valid {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(url.trim_end_matches('/').to_string()))
    }

    /// Joins an endpoint path onto this base URL.
    ///
    /// The path may be given with or without a leading slash. Absolute
    /// `http`/`https` URLs are passed through unchanged, so callers can target
    /// endpoints outside the auth service without a second client.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brainex_auth::BaseUrl;
    ///
    /// let base = BaseUrl::new("https://portal.example.com/api/auth").unwrap();
    /// assert_eq!(base.join("/login"), "https://portal.example.com/api/auth/login");
    /// assert_eq!(base.join("me"), "https://portal.example.com/api/auth/me");
    /// assert_eq!(base.join("https://other.example.com/x"), "https://other.example.com/x");
    /// ```
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_accepts_https() {
        let url = BaseUrl::new("https://portal.example.com/api/auth").unwrap();
        assert_eq!(url.as_ref(), "https://portal.example.com/api/auth");
    }

    #[test]
    fn test_base_url_accepts_http_localhost() {
        let url = BaseUrl::new("http://localhost:5000/api/auth").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:5000/api/auth");
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://portal.example.com/api/auth/").unwrap();
        assert_eq!(url.as_ref(), "https://portal.example.com/api/auth");
    }

    #[test]
    fn test_base_url_rejects_invalid_input() {
        assert!(BaseUrl::new("").is_err());
        assert!(BaseUrl::new("portal.example.com").is_err());
        assert!(BaseUrl::new("ftp://portal.example.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("https:///path-only").is_err());
    }

    #[test]
    fn test_join_normalizes_leading_slash() {
        let base = BaseUrl::new("https://portal.example.com/api/auth").unwrap();
        assert_eq!(base.join("/login"), "https://portal.example.com/api/auth/login");
        assert_eq!(base.join("login"), "https://portal.example.com/api/auth/login");
    }

    #[test]
    fn test_join_passes_absolute_urls_through() {
        let base = BaseUrl::new("https://portal.example.com/api/auth").unwrap();
        assert_eq!(
            base.join("https://cdn.example.com/file.json"),
            "https://cdn.example.com/file.json"
        );
        assert_eq!(
            base.join("http://other.example.com/x"),
            "http://other.example.com/x"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let url = BaseUrl::new("https://portal.example.com/api/auth").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, r#""https://portal.example.com/api/auth""#);

        let parsed: BaseUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, url);
    }

    #[test]
    fn test_deserialize_rejects_invalid_url() {
        let result: Result<BaseUrl, _> = serde_json::from_str(r#""not-a-url""#);
        assert!(result.is_err());
    }
}
