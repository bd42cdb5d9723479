//! Response types: the raw context handed to response hooks and the typed
//! wrapper returned to callers.

use http::{HeaderMap, Method, StatusCode};
use std::time::Duration;
use url::Url;

/// The raw response as seen by response hooks, before any parsing.
///
/// Every received response — any status code — is wrapped in a
/// `ResponseContext` and threaded through the response hook chain. Hooks may
/// rewrite any field; whatever body comes out of the chain is what gets
/// deserialized into the caller's expected type.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    /// The HTTP status code.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The response body, read to completion as text.
    pub body: String,

    /// The method of the request that produced this response.
    pub method: Method,

    /// The fully resolved URL the request was sent to.
    pub url: Url,
}

impl ResponseContext {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Replaces the body, keeping everything else.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A typed, successfully resolved response.
///
/// Wraps the deserialized data together with the raw body, status, headers,
/// and the latency of the call.
///
/// # Examples
///
/// ```no_run
/// use serde::Deserialize;
/// use wicket::{Client, RequestConfig};
///
/// #[derive(Deserialize)]
/// struct User {
///     name: String,
/// }
///
/// # async fn example() -> wicket::Result<()> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// let response = client.get::<User>("/users/123", RequestConfig::new()).await?;
/// println!("User: {}", response.data.name);
/// println!("Took {:?}, status {}", response.latency, response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The deserialized response data.
    pub data: T,

    /// The raw response body as a string, useful for debugging and logging.
    pub raw_body: String,

    /// The HTTP status code. When a response hook rewrote the context, this is
    /// the status as the chain left it.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from dispatching the request until the response body was read.
    pub latency: Duration,
}

impl<T> Response<T> {
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
        }
    }

    /// Maps the response data to a different type, preserving the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// # use wicket::Response;
    /// let response = Response::new(
    ///     42,
    ///     "42".to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(100),
    /// );
    ///
    /// let string_response = response.map(|n| n.to_string());
    /// assert_eq!(string_response.data, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
        }
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
