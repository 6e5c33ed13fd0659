//! Main client entry point.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{EnvironmentEntry, ProxyEntry, RelayConfig};
use crate::error::Result;
use crate::models::{ResourceRequest, Scheme};
use crate::transport::headers;
use crate::transport::http::HttpTransport;

/// Environment-aware HTTP resource client.
///
/// Holds a static configuration bundle (default headers, environment and
/// proxy maps, current environment label) and exposes verb-named methods
/// that issue one HTTP call each and resolve to the decoded response body.
/// The client is `Send + Sync` and meant to be shared behind an `Arc`.
///
/// # Examples
///
/// ```rust,no_run
/// use relay_gate::{RelayClient, ResourceRequest, Scheme};
///
/// # async fn example() -> relay_gate::Result<()> {
/// let client = RelayClient::builder()
///     .header("X-Api-Key", "k1")
///     .route("stg", "p1")
///     .proxy("p1", "api.stg.example.com")
///     .build()?;
///
/// let url = client.resource_url(Scheme::Https, "/v1/users")?;
/// let users = client.fetch(ResourceRequest::new(url)).await?;
/// println!("{users}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RelayClient {
    config: RelayConfig,
    environment: RwLock<String>,
    transport: HttpTransport,
}

impl RelayClient {
    /// Create a client from a configuration, with default transport settings.
    ///
    /// The configuration is accepted as-is; unknown environments and
    /// dangling proxy ids only surface when a URL is built for them.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            environment: RwLock::new(config.environment.clone()),
            config,
            transport: HttpTransport::new(),
        }
    }

    /// Create a builder for configuring the client.
    pub fn builder() -> RelayClientBuilder {
        RelayClientBuilder::new()
    }

    /// The default headers applied when a call supplies none.
    ///
    /// This is a shared view of the stored map, not a copy.
    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.config.headers
    }

    /// The current environment label.
    pub fn environment(&self) -> String {
        self.environment.read().expect("lock poisoned").clone()
    }

    /// Switch the environment used by [`resource_url`](Self::resource_url).
    ///
    /// The name is accepted unconditionally; an unknown environment only
    /// surfaces later during URL construction. A call racing with
    /// `resource_url` on another task observes either the old or the new
    /// label, nothing in between.
    pub fn set_environment(&self, name: impl Into<String>) {
        let name = name.into();
        debug!(environment = name.as_str(), "Switching environment");
        *self.environment.write().expect("lock poisoned") = name;
    }

    /// Build a fully qualified URL for an endpoint through the current
    /// environment's proxy.
    ///
    /// The endpoint is appended verbatim, so it normally starts with `/`.
    /// Host resolution follows [`RelayConfig::resolve_proxy_host`].
    ///
    /// # Errors
    ///
    /// [`Error::ProxyLookup`](crate::Error::ProxyLookup) when the current
    /// environment names a proxy id that has no entry.
    pub fn resource_url(&self, scheme: Scheme, endpoint: &str) -> Result<String> {
        let environment = self.environment.read().expect("lock poisoned").clone();
        let host = self.config.resolve_proxy_host(&environment)?;
        Ok(format!("{scheme}://{host}{endpoint}"))
    }

    /// Issue a GET request. Never sends a body.
    pub async fn fetch(&self, request: ResourceRequest) -> Result<Value> {
        self.send(Method::GET, &request, None).await
    }

    /// Issue a POST request with the request body, when present.
    pub async fn post(&self, request: ResourceRequest) -> Result<Value> {
        self.send(Method::POST, &request, request.body.as_ref()).await
    }

    /// Issue a PUT request with the request body, when present.
    pub async fn put(&self, request: ResourceRequest) -> Result<Value> {
        self.send(Method::PUT, &request, request.body.as_ref()).await
    }

    /// Issue an OPTIONS request with the request body, when present.
    pub async fn options(&self, request: ResourceRequest) -> Result<Value> {
        self.send(Method::OPTIONS, &request, request.body.as_ref()).await
    }

    /// Issue a DELETE request. Never sends a body, even when one is set.
    pub async fn destroy(&self, request: ResourceRequest) -> Result<Value> {
        self.send(Method::DELETE, &request, None).await
    }

    async fn send(
        &self,
        method: Method,
        request: &ResourceRequest,
        body: Option<&Value>,
    ) -> Result<Value> {
        let headers = headers::effective(&self.config.headers, request.headers.as_ref());
        self.transport
            .request(method, &request.url, headers, body)
            .await
    }
}

/// Builder for [`RelayClient`].
///
/// The base configuration comes from [`config`](Self::config) when set,
/// else from [`config_file`](Self::config_file), else from
/// [`RelayConfig::default`]. Field-level overrides then replace the
/// corresponding base fields wholesale.
pub struct RelayClientBuilder {
    config: Option<RelayConfig>,
    config_file: Option<PathBuf>,
    headers: Option<HashMap<String, String>>,
    environment: Option<String>,
    environments: Option<HashMap<String, EnvironmentEntry>>,
    proxies: Option<HashMap<String, ProxyEntry>>,
    reqwest_client: Option<reqwest::Client>,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl RelayClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            config_file: None,
            headers: None,
            environment: None,
            environments: None,
            proxies: None,
            reqwest_client: None,
            connect_timeout: None,
            request_timeout: None,
            user_agent: None,
        }
    }

    /// Use this configuration as the base.
    pub fn config(mut self, config: RelayConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the base configuration from a JSON file at build time.
    ///
    /// Ignored when [`config`](Self::config) is also set.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Add one default header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the default headers.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Set the initial environment label.
    pub fn environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    /// Replace the environment map.
    pub fn environments(mut self, environments: HashMap<String, EnvironmentEntry>) -> Self {
        self.environments = Some(environments);
        self
    }

    /// Route one environment through a proxy id.
    pub fn route(mut self, environment: impl Into<String>, proxy_id: impl Into<String>) -> Self {
        self.environments
            .get_or_insert_with(HashMap::new)
            .insert(environment.into(), EnvironmentEntry::proxy(proxy_id));
        self
    }

    /// Replace the proxy map.
    pub fn proxies(mut self, proxies: HashMap<String, ProxyEntry>) -> Self {
        self.proxies = Some(proxies);
        self
    }

    /// Register one proxy id with its upstream host.
    pub fn proxy(mut self, id: impl Into<String>, host: impl Into<String>) -> Self {
        self.proxies
            .get_or_insert_with(HashMap::new)
            .insert(id.into(), ProxyEntry::host(host));
        self
    }

    /// Use an existing reqwest client instead of building one.
    pub fn reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.reqwest_client = Some(client);
        self
    }

    /// Set the connection timeout of the built transport.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the request timeout of the built transport.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the user agent of the built transport.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Fails only when a configuration file was requested and cannot be
    /// read or parsed.
    pub fn build(self) -> Result<RelayClient> {
        // Priority: explicit config > config file > defaults
        let mut config = match (self.config, self.config_file) {
            (Some(config), _) => config,
            (None, Some(path)) => RelayConfig::from_json_file(path)?,
            (None, None) => RelayConfig::default(),
        };

        if let Some(headers) = self.headers {
            config.headers = headers;
        }
        if let Some(environments) = self.environments {
            config.environments = environments;
        }
        if let Some(proxies) = self.proxies {
            config.proxies = proxies;
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }

        let transport = match self.reqwest_client {
            Some(client) => HttpTransport::with_client(client),
            None => {
                let mut builder = HttpTransport::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                if let Some(timeout) = self.request_timeout {
                    builder = builder.request_timeout(timeout);
                }
                if let Some(ua) = &self.user_agent {
                    builder = builder.user_agent(ua);
                }
                builder.build()
            }
        };

        info!(environment = config.environment.as_str(), "RelayClient initialized");
        Ok(RelayClient {
            environment: RwLock::new(config.environment.clone()),
            config,
            transport,
        })
    }
}

impl Default for RelayClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
