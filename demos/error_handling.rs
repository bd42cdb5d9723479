//! Demonstrates the error taxonomy.
//!
//! This example shows how to:
//! - Match on the different error variants
//! - Recover the status code and raw body from an error response
//! - Trigger a pre-network rejection with a mismatched content type
//!
//! Run with: `cargo run --example error_handling`

use wicket::{Client, Error, RequestConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("wicket=debug,error_handling=info")
        .init();

    let client = Client::builder().base_url("https://httpbin.org")?.build()?;

    println!("=== Non-2xx without a response hook ===");
    // With no response hook registered, a 404 rejects with Error::Status; the
    // raw response stays available for inspection.
    match client
        .get::<serde_json::Value>("/status/404", RequestConfig::new())
        .await
    {
        Ok(_) => println!("Unexpected success"),
        Err(Error::Status { status, raw_response, .. }) => {
            println!("Rejected with status {} (body: {:?})", status, raw_response);
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Content-type mismatch rejects before the network ===");
    let config = RequestConfig::new()
        .json(&serde_json::json!({"v": 1}))?
        .header("content-type", "text/plain")?;
    match client.post::<serde_json::Value>("/post", config).await {
        Err(Error::ContentTypeMismatch { declared }) => {
            println!("Rejected locally: structured body with content-type {:?}", declared);
        }
        other => println!("Unexpected outcome: {:?}", other.map(|r| r.status)),
    }
    println!();

    println!("=== Network error ===");
    let unreachable = Client::builder().base_url("http://127.0.0.1:9")?.build()?;
    match unreachable
        .get::<serde_json::Value>("/", RequestConfig::new())
        .await
    {
        Err(Error::Network(e)) => println!("Transport failure: {}", e),
        other => println!("Unexpected outcome: {:?}", other.map(|r| r.status)),
    }
    println!();

    println!("=== Generic status accessor ===");
    if let Err(e) = client
        .get::<serde_json::Value>("/status/500", RequestConfig::new())
        .await
    {
        println!("error.status() = {:?}", e.status());
        println!("error.raw_response() = {:?}", e.raw_response());
    }

    Ok(())
}
