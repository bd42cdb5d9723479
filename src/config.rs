//! Request configuration and the merge rules between per-call options and
//! instance defaults.

use crate::{urls::Query, Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::time::Duration;

/// A raw, pre-serialized request body.
#[derive(Debug, Clone)]
pub enum RawBody {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<String> for RawBody {
    fn from(text: String) -> Self {
        RawBody::Text(text)
    }
}

impl From<&str> for RawBody {
    fn from(text: &str) -> Self {
        RawBody::Text(text.to_string())
    }
}

impl From<Vec<u8>> for RawBody {
    fn from(bytes: Vec<u8>) -> Self {
        RawBody::Bytes(bytes)
    }
}

impl From<&[u8]> for RawBody {
    fn from(bytes: &[u8]) -> Self {
        RawBody::Bytes(bytes.to_vec())
    }
}

/// Configuration for a pending or default request.
///
/// A config describes everything about a request except its path: method,
/// headers, query parameters, body, and passthrough transport options. Per-call
/// configs are overlaid onto the client's defaults via [`merged_over`], and a
/// request hook may rewrite the merged result before the request is built.
///
/// The `json` field holds a structured payload serialized at send time; when
/// both `json` and `body` are present after merging, `json` wins.
///
/// [`merged_over`]: RequestConfig::merged_over
///
/// # Examples
///
/// ```
/// use http::Method;
/// use wicket::RequestConfig;
///
/// # fn example() -> wicket::Result<()> {
/// let config = RequestConfig::new()
///     .method(Method::POST)
///     .header("x-api-key", "secret")?
///     .query([("page", "2")])
///     .json(&serde_json::json!({"name": "Alice"}))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// The HTTP method. Verb methods on the client fill this in; `None` means
    /// GET for the generic `request` call.
    pub method: Option<Method>,

    /// Headers for this request. Lookup is case-insensitive.
    pub headers: HeaderMap,

    /// Query parameters, appended to the resolved URL.
    pub query: Option<Query>,

    /// A raw body, passed through unchanged.
    pub body: Option<RawBody>,

    /// A structured payload, serialized to JSON at send time. Takes precedence
    /// over `body` and requires a JSON content type.
    pub json: Option<serde_json::Value>,

    /// Per-request timeout, handed to the transport untouched.
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds a header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets a raw body, passed to the transport unchanged.
    pub fn body(mut self, body: impl Into<RawBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a structured JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be represented as JSON.
    pub fn json<T: Serialize>(mut self, payload: &T) -> Result<Self> {
        self.json = Some(
            serde_json::to_value(payload).map_err(|e| Error::BodySerialization(e.to_string()))?,
        );
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overlays `self` (the more specific configuration) onto `defaults`.
    ///
    /// Headers merge key-wise with `self` winning per key; every other field
    /// is replaced wholesale by `self`'s value when present.
    pub fn merged_over(self, defaults: &RequestConfig) -> RequestConfig {
        let mut headers = defaults.headers.clone();
        for (name, value) in self.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        RequestConfig {
            method: self.method.or_else(|| defaults.method.clone()),
            headers,
            query: self.query.or_else(|| defaults.query.clone()),
            body: self.body.or_else(|| defaults.body.clone()),
            json: self.json.or_else(|| defaults.json.clone()),
            timeout: self.timeout.or(defaults.timeout),
        }
    }
}

/// The mutable working state threaded through request hooks before the
/// concrete request is built.
///
/// Hooks receive the resolved relative path and the merged configuration and
/// may rewrite either: change the path, swap the method, add headers, or
/// replace the body.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The path to join onto the client's base URL.
    pub path: String,

    /// The merged configuration for this call.
    pub config: RequestConfig,
}

impl RequestContext {
    pub fn new(path: impl Into<String>, config: RequestConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_call_headers_win_key_wise() {
        let defaults = RequestConfig::new()
            .header("x-api-key", "default")
            .unwrap()
            .header("accept", "application/json")
            .unwrap();
        let per_call = RequestConfig::new().header("x-api-key", "override").unwrap();

        let merged = per_call.merged_over(&defaults);
        assert_eq!(merged.headers.get("x-api-key").unwrap(), "override");
        assert_eq!(merged.headers.get("accept").unwrap(), "application/json");
    }

    #[test]
    fn defaults_survive_when_per_call_is_empty() {
        let defaults = RequestConfig::new()
            .method(Method::POST)
            .query([("a", "1")])
            .body("payload")
            .timeout(Duration::from_secs(5));

        let merged = RequestConfig::new().merged_over(&defaults);
        assert_eq!(merged.method, Some(Method::POST));
        assert_eq!(merged.query.unwrap().encode(), "a=1");
        assert!(matches!(merged.body, Some(RawBody::Text(ref t)) if t == "payload"));
        assert_eq!(merged.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn query_and_body_replace_wholesale() {
        let defaults = RequestConfig::new().query([("a", "1"), ("b", "2")]).body("old");
        let per_call = RequestConfig::new().query([("c", "3")]).body("new");

        let merged = per_call.merged_over(&defaults);
        assert_eq!(merged.query.unwrap().encode(), "c=3");
        assert!(matches!(merged.body, Some(RawBody::Text(ref t)) if t == "new"));
    }

    #[test]
    fn per_call_json_replaces_default_json() {
        let defaults = RequestConfig::new().json(&serde_json::json!({"v": 1})).unwrap();
        let per_call = RequestConfig::new().json(&serde_json::json!({"v": 2})).unwrap();

        let merged = per_call.merged_over(&defaults);
        assert_eq!(merged.json, Some(serde_json::json!({"v": 2})));
    }

    #[test]
    fn structured_and_raw_bodies_coexist_until_build() {
        // Precedence between json and body is applied when the outgoing
        // request is built, not during the merge.
        let defaults = RequestConfig::new().body("raw");
        let per_call = RequestConfig::new().json(&serde_json::json!({"v": 1})).unwrap();

        let merged = per_call.merged_over(&defaults);
        assert!(merged.body.is_some());
        assert!(merged.json.is_some());
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let result = RequestConfig::new().header("bad header\n", "v");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
