//! HTTP dispatch over a shared reqwest client.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::transport::headers;

/// Default user agent sent with every request.
pub const USER_AGENT: &str = "relay-gate/0.1.0";

/// Default connection timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Thin wrapper over [`reqwest::Client`] with the crate's response handling.
///
/// Each call is sent exactly once; there is no retry. Failures are logged
/// with the request URL before they are returned.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new builder.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Create a transport over an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Send one request and decode the response body.
    ///
    /// A non-2xx status becomes [`Error::Api`] carrying the response body as
    /// its message; transport failures become [`Error::Network`].
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&Value>,
    ) -> Result<Value> {
        debug!(%method, url, "Sending request");

        match self.dispatch(method, url, headers, body).await {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(url, error = %e, "Request failed");
                Err(e)
            }
        }
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let mut request = self
            .client
            .request(method, url)
            .headers(headers::header_map(headers));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, message });
        }

        let text = response.text().await?;
        Ok(decode_body(&text))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a response body JSON-first: valid JSON parses to its value, an
/// empty body becomes `Null`, anything else is kept as a string.
fn decode_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Builder for [`HttpTransport`].
pub struct HttpTransportBuilder {
    builder: ClientBuilder,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            builder: Client::builder()
                .user_agent(USER_AGENT)
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(REQUEST_TIMEOUT),
        }
    }
}

impl HttpTransportBuilder {
    /// Set a custom user agent.
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.builder = self.builder.user_agent(ua);
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.builder = self.builder.connect_timeout(timeout);
        self
    }

    /// Set request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.builder = self.builder.timeout(timeout);
        self
    }

    /// Build the transport.
    pub fn build(self) -> HttpTransport {
        let client = match self.builder.build() {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to build HTTP client with custom config: {}; using defaults", e);
                Client::default()
            }
        };
        HttpTransport { client }
    }
}
