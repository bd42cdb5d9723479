//! # Wicket - a thin, interceptor-first HTTP client
//!
//! Wicket is a small async HTTP client built directly on `reqwest` that adds
//! three things: base-URL resolution, ordered request/response interceptor
//! hooks, and automatic JSON marshalling. Its defining property is that
//! **every response flows through the response hook chain, whatever its
//! status code** — error responses are never diverted around your
//! interceptors the way some client libraries do.
//!
//! ## Quick Start
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use wicket::{Client, RequestConfig};
//!
//! #[derive(Serialize)]
//! struct CreateUser {
//!     name: String,
//!     email: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wicket::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com")?
//!         .default_header("x-api-key", "secret")?
//!         .build()?;
//!
//!     // GET with query parameters
//!     let user = client
//!         .get::<User>("/users/123", RequestConfig::new().query([("expand", "profile")]))
//!         .await?;
//!     println!("User: {} ({:?})", user.data.name, user.latency);
//!
//!     // POST with a JSON body
//!     let body = CreateUser {
//!         name: "Alice".to_string(),
//!         email: "alice@example.com".to_string(),
//!     };
//!     let created = client
//!         .post::<User>("/users", RequestConfig::new().json(&body)?)
//!         .await?;
//!     println!("Created user {}", created.data.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Hooks
//!
//! Hooks are ordered, sequentially awaited interceptors. Request hooks can
//! rewrite the pending configuration before the request is built; response
//! hooks can transform the raw response before it is parsed:
//!
//! ```no_run
//! use wicket::{Client, ResponseContext};
//!
//! # fn example() -> wicket::Result<()> {
//! let client = Client::builder()
//!     .base_url("https://api.example.com")?
//!     .request_hook(|mut ctx: wicket::RequestContext| async move {
//!         ctx.config = ctx.config.header("authorization", "Bearer token")?;
//!         Ok(ctx)
//!     })
//!     .response_hook(|ctx: ResponseContext| async move {
//!         // Runs for 503s just like 200s; this chain owns success/failure.
//!         if !ctx.is_success() {
//!             tracing::warn!(status = ctx.status.as_u16(), "upstream error");
//!         }
//!         Ok(ctx)
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! A hook that returns an error is logged and skipped — the chain continues
//! with the value the hook was given, and the request proceeds.
//!
//! ## Error responses without hooks
//!
//! With no response hook registered, non-2xx responses reject with
//! [`Error::Status`], which keeps the status, headers, and raw body:
//!
//! ```no_run
//! use wicket::{Client, Error, RequestConfig};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder().base_url("https://api.example.com")?.build()?;
//! match client.get::<serde_json::Value>("/endpoint", RequestConfig::new()).await {
//!     Ok(response) => println!("Success: {:?}", response.data),
//!     Err(Error::Status { status, raw_response, .. }) => {
//!         eprintln!("HTTP error {}: {}", status, raw_response);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
pub mod hooks;
mod response;
pub mod urls;

pub use client::{Client, ClientBuilder};
pub use config::{RawBody, RequestConfig, RequestContext};
pub use error::{Error, Result};
pub use hooks::{Hook, HookError};
pub use response::{Response, ResponseContext};
pub use urls::{Query, QueryBuilder};
