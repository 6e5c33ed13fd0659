//! Basic usage example for relay-gate.
//!
//! Routes a "demo" environment through a proxy entry pointing at
//! httpbin.org, then issues a GET and a POST through the client.
//!
//! # Running
//!
//! ```bash
//! cargo run --example basic_usage
//! ```

use relay_gate::{RelayClient, ResourceRequest, Result, Scheme};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== Relay Gate: Basic Usage Example ===\n");

    // Build a client whose "demo" environment routes to httpbin
    let client = RelayClient::builder()
        .header("X-Demo", "relay-gate")
        .route("demo", "httpbin")
        .proxy("httpbin", "httpbin.org")
        .environment("demo")
        .build()?;

    println!("environment:     {}", client.environment());
    println!("default headers: {:?}\n", client.default_headers());

    // GET a JSON document
    let url = client.resource_url(Scheme::Https, "/json")?;
    println!("GET {url}");
    let value = client.fetch(ResourceRequest::new(url)).await?;
    println!("{}\n", serde_json::to_string_pretty(&value)?);

    // POST a body; httpbin echoes it back under "json"
    let url = client.resource_url(Scheme::Https, "/post")?;
    println!("POST {url}");
    let value = client
        .post(ResourceRequest::new(url).body(json!({"name": "relay", "count": 3})))
        .await?;
    println!("echoed body: {}\n", value["json"]);

    // Per-call headers replace the defaults for that call only
    let url = client.resource_url(Scheme::Https, "/headers")?;
    println!("GET {url} (with per-call headers)");
    let call_headers =
        std::collections::HashMap::from([("X-One-Off".to_string(), "yes".to_string())]);
    let value = client
        .fetch(ResourceRequest::new(url).headers(call_headers))
        .await?;
    println!("server saw: {}", value["headers"]);

    Ok(())
}
