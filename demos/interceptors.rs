//! Demonstrates request and response hooks.
//!
//! This example shows how to:
//! - Inject authentication headers from a request hook
//! - Observe and transform responses from a response hook
//! - Handle error statuses inside the hook chain instead of around it
//!
//! Run with: `cargo run --example interceptors`

use wicket::{Client, Error, RequestConfig, RequestContext, ResponseContext};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("wicket=debug,interceptors=info")
        .init();

    let client = Client::builder()
        .base_url("https://httpbin.org")?
        // Request hooks run in registration order; each sees the previous
        // hook's output.
        .request_hook(|mut ctx: RequestContext| async move {
            ctx.config = ctx.config.header("authorization", "Bearer demo-token")?;
            Ok(ctx)
        })
        .request_hook(|mut ctx: RequestContext| async move {
            ctx.config = ctx.config.header("x-request-id", "demo-42")?;
            println!("-> {} {}", ctx.config.method.as_ref().map(|m| m.as_str()).unwrap_or("GET"), ctx.path);
            Ok(ctx)
        })
        // The response hook sees every response, error statuses included,
        // and its output is what the caller receives.
        .response_hook(|ctx: ResponseContext| async move {
            println!("<- {} from {}", ctx.status, ctx.url);
            if ctx.is_success() {
                Ok(ctx)
            } else {
                // Normalize upstream errors into a shape the caller can parse.
                let status = ctx.status.as_u16();
                Ok(ctx.with_body(format!(r#"{{"error": true, "status": {}}}"#, status)))
            }
        })
        .build()?;

    println!("=== Successful request through the hook chain ===");
    let response = client
        .get::<serde_json::Value>("/headers", RequestConfig::new())
        .await?;
    println!("Echoed headers: {:#?}", response.data["headers"]);
    println!();

    println!("=== Error status through the same chain ===");
    // /status/503 returns a 503; with the response hook registered the call
    // still resolves, with the hook's normalized body.
    let degraded = client
        .get::<serde_json::Value>("/status/503", RequestConfig::new())
        .await?;
    println!("Normalized error payload: {}", degraded.data);
    println!("Original status preserved: {}", degraded.status);

    Ok(())
}
