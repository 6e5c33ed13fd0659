//! Proxy routing example: how environments, proxy ids, and fallbacks
//! interact when URLs are built. Everything runs offline; no request is
//! sent.
//!
//! # Running
//!
//! ```bash
//! cargo run --example proxy_routing
//! ```

use relay_gate::{RelayClient, RelayConfig, Result, Scheme};

fn main() -> Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== Relay Gate: Proxy Routing Example ===\n");

    let config = RelayConfig::from_json_str(
        r#"{
            "environments": {
                "stg":    {"api": "edge-stg"},
                "prod":   {"api": "edge-prod"},
                "dev":    {},
                "broken": {"api": "ghost"}
            },
            "proxies": {
                "edge-stg":  {"api": "api.stg.example.com"},
                "edge-prod": {"api": "api.example.com:8443"},
                "local":     {"api": "localhost:8080"}
            }
        }"#,
    )?;
    let client = RelayClient::new(config);

    // stg (the default environment) routes through edge-stg
    println!("stg    -> {}", client.resource_url(Scheme::Https, "/v1/users")?);

    // prod routes through edge-prod
    client.set_environment("prod");
    println!("prod   -> {}", client.resource_url(Scheme::Https, "/v1/users")?);

    // dev has an entry but no proxy id: the "local" proxy entry applies
    client.set_environment("dev");
    println!("dev    -> {}", client.resource_url(Scheme::Http, "/v1/users")?);

    // qa has no entry at all: same "local" fallback
    client.set_environment("qa");
    println!("qa     -> {}", client.resource_url(Scheme::Http, "/v1/users")?);

    // A dangling proxy id is reported instead of silently falling back
    client.set_environment("broken");
    match client.resource_url(Scheme::Https, "/v1/users") {
        Ok(url) => println!("broken -> {url}"),
        Err(e) => println!("broken -> error: {e}"),
    }

    // With no proxies configured at all, the hostname bottoms out at the
    // built-in default
    let bare = RelayClient::new(RelayConfig::default());
    println!("bare   -> {}", bare.resource_url(Scheme::Http, "/v1/users")?);

    Ok(())
}
