//! The HTTP client and its request pipeline.
//!
//! The [`Client`] type is the main entry point. Use [`ClientBuilder`] to set
//! the base URL, default configuration, and interceptor hooks.

use crate::{
    config::{RawBody, RequestConfig, RequestContext},
    hooks::{Hook, HookChain, HookError},
    response::{Response, ResponseContext},
    urls, Error, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// An HTTP client with base-URL resolution, request/response hooks, and
/// automatic JSON marshalling.
///
/// The client is cheap to clone and designed to be reused across many
/// concurrent requests. Every outgoing call runs the request hook chain and
/// every received response runs the response hook chain — including non-2xx
/// responses, which are never diverted around the interceptors.
///
/// # Examples
///
/// ```no_run
/// use serde::{Deserialize, Serialize};
/// use wicket::{Client, RequestConfig};
///
/// #[derive(Serialize)]
/// struct CreateUser {
///     name: String,
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> wicket::Result<()> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .default_header("x-api-key", "secret")?
///     .request_hook(|mut ctx: wicket::RequestContext| async move {
///         ctx.config = ctx.config.header("x-trace-id", "abc123")?;
///         Ok(ctx)
///     })
///     .build()?;
///
/// let user = client.get::<User>("/users/123", RequestConfig::new()).await?;
/// println!("User: {}", user.data.name);
///
/// let body = CreateUser { name: "Alice".to_string() };
/// let created = client
///     .post::<User>("/users", RequestConfig::new().json(&body)?)
///     .await?;
/// println!("Created user {}", created.data.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    defaults: RequestConfig,
    request_hooks: HookChain<RequestContext>,
    response_hooks: HookChain<ResponseContext>,
}

impl Client {
    /// Creates a new [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Makes a request to `path`, resolved against the base URL.
    ///
    /// This is the generic entry point the verb methods forward to. The
    /// pipeline: merge `config` over the instance defaults, run the request
    /// hook chain, resolve the URL, build the body, send, then run the
    /// response hook chain over whatever came back.
    ///
    /// When at least one response hook is registered, the chain's output is
    /// deserialized and resolves the call regardless of status — the hooks
    /// own success/failure semantics. With no response hook, 2xx responses
    /// deserialize as JSON and any other status rejects with
    /// [`Error::Status`] carrying the raw response.
    pub async fn request<Res>(
        &self,
        path: impl Into<String>,
        config: RequestConfig,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let start_time = Instant::now();

        let merged = config.merged_over(&self.inner.defaults);
        let context = RequestContext::new(path, merged);

        // Request hooks may rewrite path, method, headers, or body.
        let context = self.inner.request_hooks.dispatch(context).await;

        let method = context.config.method.clone().unwrap_or(Method::GET);
        let url = self.resolve_url(&context)?;

        let mut headers = context.config.headers.clone();
        let body = build_body(&method, &context.config, &mut headers)?;

        tracing::debug!(
            method = %method,
            url = %url,
            "Dispatching HTTP request"
        );

        let mut request = self.inner.http_client.request(method.clone(), url.clone());
        request = request.headers(headers);
        if let Some(timeout) = context.config.timeout {
            request = request.timeout(timeout);
        }
        match body {
            Some(RawBody::Text(text)) => request = request.body(text),
            Some(RawBody::Bytes(bytes)) => request = request.body(bytes),
            None => {}
        }

        // Transport failures reject here; response hooks never see them.
        let response = request.send().await?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let raw_body = response.text().await?;

        tracing::info!(
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis() as u64,
            "Received HTTP response"
        );

        // Snapshot before dispatching; a hook registered mid-flight is not
        // guaranteed to be observed by this call.
        let hooked = !self.inner.response_hooks.is_empty();
        let context = ResponseContext {
            status,
            headers: response_headers,
            body: raw_body,
            method,
            url,
        };
        let context = self.inner.response_hooks.dispatch(context).await;

        if !hooked && !context.status.is_success() {
            if context.status.is_client_error() {
                tracing::warn!(
                    status = context.status.as_u16(),
                    response = %context.body,
                    "Client error (4xx)"
                );
            } else {
                tracing::warn!(
                    status = context.status.as_u16(),
                    response = %context.body,
                    "Server error"
                );
            }
            return Err(Error::Status {
                status: context.status,
                raw_response: context.body,
                headers: context.headers,
            });
        }

        parse_payload(context, start_time.elapsed())
    }

    /// Makes a GET request. Any body in `config` is discarded: GET requests
    /// never carry one.
    pub async fn get<Res>(
        &self,
        path: impl Into<String>,
        config: RequestConfig,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        self.request(path, config.method(Method::GET)).await
    }

    /// Makes a POST request. Set the body via [`RequestConfig::json`] or
    /// [`RequestConfig::body`].
    pub async fn post<Res>(
        &self,
        path: impl Into<String>,
        config: RequestConfig,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        self.request(path, config.method(Method::POST)).await
    }

    /// Makes a HEAD request. Like GET, never carries a body; an empty
    /// response body deserializes as JSON `null`, so `Res = ()` works.
    pub async fn head<Res>(
        &self,
        path: impl Into<String>,
        config: RequestConfig,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        self.request(path, config.method(Method::HEAD)).await
    }

    /// Makes an OPTIONS request.
    pub async fn options<Res>(
        &self,
        path: impl Into<String>,
        config: RequestConfig,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        self.request(path, config.method(Method::OPTIONS)).await
    }

    /// Registers a request hook at the end of the chain.
    ///
    /// Keep a clone of the [`Hook`] handle to remove it later.
    pub fn add_request_hook(&self, hook: Hook<RequestContext>) {
        self.inner.request_hooks.register(hook);
    }

    /// Removes request hooks: all registrations of `Some(hook)`, or every
    /// request hook when given `None`.
    pub fn remove_request_hook(&self, hook: Option<&Hook<RequestContext>>) {
        self.inner.request_hooks.unregister(hook);
    }

    /// Registers a response hook at the end of the chain.
    pub fn add_response_hook(&self, hook: Hook<ResponseContext>) {
        self.inner.response_hooks.register(hook);
    }

    /// Removes response hooks: all registrations of `Some(hook)`, or every
    /// response hook when given `None`.
    pub fn remove_response_hook(&self, hook: Option<&Hook<ResponseContext>>) {
        self.inner.response_hooks.unregister(hook);
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn resolve_url(&self, context: &RequestContext) -> Result<Url> {
        let mut url = urls::join(&self.inner.base_url, &context.path)?;
        if let Some(query) = &context.config.query {
            query.apply(&mut url);
        }
        Ok(url)
    }
}

/// Applies the body rules: GET and HEAD never carry a body; a structured
/// payload wins over a raw one and requires a JSON content type, injected
/// when absent and rejected when declared otherwise.
fn build_body(
    method: &Method,
    config: &RequestConfig,
    headers: &mut HeaderMap,
) -> Result<Option<RawBody>> {
    if *method == Method::GET || *method == Method::HEAD {
        return Ok(None);
    }
    if let Some(json) = &config.json {
        match headers.get(header::CONTENT_TYPE) {
            None => {
                headers.insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
            }
            Some(declared) if declares_json(declared) => {}
            Some(declared) => {
                return Err(Error::ContentTypeMismatch {
                    declared: String::from_utf8_lossy(declared.as_bytes()).into_owned(),
                });
            }
        }
        let text =
            serde_json::to_string(json).map_err(|e| Error::BodySerialization(e.to_string()))?;
        return Ok(Some(RawBody::Text(text)));
    }
    Ok(config.body.clone())
}

fn declares_json(value: &HeaderValue) -> bool {
    value
        .to_str()
        .map(|v| {
            let mime = v.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

fn parse_payload<Res>(context: ResponseContext, latency: Duration) -> Result<Response<Res>>
where
    Res: DeserializeOwned,
{
    // An empty body (HEAD, 204) parses as JSON null so unit and Option
    // targets work.
    let parsed = if context.body.trim().is_empty() {
        serde_json::from_str::<Res>("null")
    } else {
        serde_json::from_str::<Res>(&context.body)
    };

    match parsed {
        Ok(data) => Ok(Response::new(
            data,
            context.body,
            context.status,
            context.headers,
            latency,
        )),
        Err(e) => {
            tracing::error!(
                error = %e,
                raw_response = %context.body,
                "Failed to deserialize response"
            );
            Err(Error::DeserializationFailed {
                raw_response: context.body,
                serde_error: e.to_string(),
                status: context.status,
            })
        }
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use wicket::ClientBuilder;
///
/// # fn example() -> wicket::Result<()> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com")?
///     .timeout(Duration::from_secs(30))
///     .default_header("user-agent", "my-app/1.0")?
///     .response_hook(|ctx: wicket::ResponseContext| async move {
///         // Sees every response, 503s included.
///         Ok(ctx)
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    defaults: RequestConfig,
    request_hooks: Vec<Hook<RequestContext>>,
    response_hooks: Vec<Hook<ResponseContext>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            defaults: RequestConfig::new(),
            request_hooks: Vec::new(),
            response_hooks: Vec::new(),
        }
    }

    /// Sets the base URL all request paths are resolved against. Required.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a header to the default configuration, included in every request
    /// unless a per-call config overrides the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.defaults.headers.insert(name, value);
        Ok(self)
    }

    /// Replaces the whole default configuration.
    pub fn defaults(mut self, defaults: RequestConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Sets the default per-request timeout. Shorthand for setting it on the
    /// default configuration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.defaults.timeout = Some(timeout);
        self
    }

    /// Registers a request hook. May be called multiple times; hooks run in
    /// the order given.
    pub fn request_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<RequestContext, HookError>> + Send + 'static,
    {
        self.request_hooks.push(Hook::new(f));
        self
    }

    /// Registers a response hook. May be called multiple times; hooks run in
    /// the order given.
    pub fn response_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(ResponseContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<ResponseContext, HookError>> + Send + 'static,
    {
        self.response_hooks.push(Hook::new(f));
        self
    }

    /// Builds the configured [`Client`].
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or the underlying HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("Base URL is required".to_string()))?;

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        let request_hooks = HookChain::new();
        for hook in self.request_hooks {
            request_hooks.register(hook);
        }
        let response_hooks = HookChain::new();
        for hook in self.response_hooks {
            response_hooks.register(hook);
        }

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                defaults: self.defaults,
                request_hooks,
                response_hooks,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn get_and_head_never_carry_a_body() {
        let config = RequestConfig::new()
            .body("payload")
            .json(&serde_json::json!({"v": 1}))
            .unwrap();
        for method in [Method::GET, Method::HEAD] {
            let mut headers = HeaderMap::new();
            let body = build_body(&method, &config, &mut headers).unwrap();
            assert!(body.is_none());
        }
    }

    #[test]
    fn structured_payload_wins_over_raw_body() {
        let config = RequestConfig::new()
            .body("raw")
            .json(&serde_json::json!({"v": 1}))
            .unwrap();
        let mut headers = HeaderMap::new();
        let body = build_body(&Method::POST, &config, &mut headers).unwrap();
        assert!(matches!(body, Some(RawBody::Text(ref t)) if t == r#"{"v":1}"#));
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn declared_json_content_type_is_kept() {
        let config = RequestConfig::new().json(&serde_json::json!({"v": 1})).unwrap();
        let mut headers = headers_with_content_type("application/json; charset=utf-8");
        build_body(&Method::POST, &config, &mut headers).unwrap();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn structured_payload_with_non_json_content_type_is_rejected() {
        let config = RequestConfig::new().json(&serde_json::json!({"v": 1})).unwrap();
        let mut headers = headers_with_content_type("text/plain");
        let result = build_body(&Method::POST, &config, &mut headers);
        assert!(matches!(
            result,
            Err(Error::ContentTypeMismatch { ref declared }) if declared == "text/plain"
        ));
    }

    #[test]
    fn json_suffix_content_types_are_accepted() {
        assert!(declares_json(&HeaderValue::from_static("application/json")));
        assert!(declares_json(&HeaderValue::from_static("application/vnd.api+json")));
        assert!(declares_json(&HeaderValue::from_static("Application/JSON; charset=utf-8")));
        assert!(!declares_json(&HeaderValue::from_static("text/plain")));
    }

    #[test]
    fn raw_body_passes_through_without_content_type_injection() {
        let config = RequestConfig::new().body("plain text");
        let mut headers = HeaderMap::new();
        let body = build_body(&Method::POST, &config, &mut headers).unwrap();
        assert!(matches!(body, Some(RawBody::Text(ref t)) if t == "plain text"));
        assert!(headers.get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn builder_requires_base_url() {
        let result = ClientBuilder::new().build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
