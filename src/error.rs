//! Error types for the request pipeline.
//!
//! Errors preserve the raw response where one exists so callers can inspect
//! status, headers, and body even on failure.

use http::{HeaderMap, StatusCode};

/// The main error type for requests made through a [`Client`](crate::Client).
///
/// Only configuration problems, transport failures, and unhandled non-2xx
/// responses reach the caller; hook failures are logged inside the chain and
/// never surface here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A transport-level error: connection failure, DNS failure, timeout.
    ///
    /// Response hooks do not run for these — there is no response to hand
    /// them.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server returned a non-2xx status and no response hook was
    /// registered to handle it.
    ///
    /// When a response hook is registered, it receives every response
    /// regardless of status and this error is never produced.
    #[error("HTTP error {status}: {raw_response}")]
    Status {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body.
        raw_response: String,
        /// The response headers.
        headers: HeaderMap,
    },

    /// Failed to deserialize the response body into the expected type.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize.
        raw_response: String,
        /// The serde error message.
        serde_error: String,
        /// The HTTP status code.
        status: StatusCode,
    },

    /// A structured payload could not be serialized to JSON.
    ///
    /// The call is rejected before anything reaches the network.
    #[error("Failed to serialize request body: {0}")]
    BodySerialization(String),

    /// A structured payload was supplied but the headers declare a non-JSON
    /// content type.
    ///
    /// The call is rejected before anything reaches the network rather than
    /// sending a body that contradicts its declared type.
    #[error("Structured body with non-JSON content type {declared:?}")]
    ContentTypeMismatch {
        /// The declared `content-type` value.
        declared: String,
    },

    /// Invalid client or request configuration, such as a bad header value or
    /// a missing base URL.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if this error carries one.
    ///
    /// # Examples
    ///
    /// ```
    /// use http::StatusCode;
    /// use wicket::Error;
    ///
    /// let err = Error::Status {
    ///     status: StatusCode::SERVICE_UNAVAILABLE,
    ///     raw_response: "down".to_string(),
    ///     headers: http::HeaderMap::new(),
    /// };
    /// assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    /// ```
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error carries one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Status { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the response headers if this error carries them.
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Error::Status { headers, .. } => Some(headers),
            _ => None,
        }
    }
}

/// A specialized `Result` type for requests.
pub type Result<T> = std::result::Result<T, Error>;
