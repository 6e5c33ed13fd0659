//! # relay-gate
//!
//! Environment-aware HTTP resource client with per-environment proxy routing.
//!
//! A small configuration bundle (default headers, environment map, proxy map)
//! drives URL construction: the current environment picks a proxy id, the
//! proxy id picks an upstream host, and each level falls back to a default
//! when unset. Verb-named methods (`fetch`, `post`, `put`, `options`,
//! `destroy`) issue one HTTP call each and resolve to the decoded JSON
//! response body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use relay_gate::{RelayClient, ResourceRequest, Result, Scheme};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = RelayClient::builder()
//!         .header("X-Api-Key", "k1")
//!         .route("stg", "edge")
//!         .route("prod", "edge-prod")
//!         .proxy("edge", "api.stg.example.com")
//!         .proxy("edge-prod", "api.example.com")
//!         .build()?;
//!
//!     let url = client.resource_url(Scheme::Https, "/v1/users")?;
//!     let users = client.fetch(ResourceRequest::new(url)).await?;
//!     println!("{users}");
//!
//!     // Switch environments without rebuilding the client.
//!     client.set_environment("prod");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

// Re-exports for ergonomic usage
pub use client::{RelayClient, RelayClientBuilder};
pub use config::{
    EnvironmentEntry, ProxyEntry, RelayConfig, DEFAULT_ENVIRONMENT, DEFAULT_PROXY_HOST,
    DEFAULT_PROXY_ID,
};
pub use error::{Error, Result};
pub use models::{ResourceRequest, Scheme};

// Re-export transport types (for advanced use cases)
pub use transport::http::{HttpTransport, HttpTransportBuilder};
