//! Routing configuration: default headers, environments, and proxies.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Environment label used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "stg";

/// Proxy id used when an environment has no proxy id configured.
pub const DEFAULT_PROXY_ID: &str = "local";

/// Upstream host used when the default proxy id has no entry either.
pub const DEFAULT_PROXY_HOST: &str = "localhost:3100";

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

/// Static configuration for a [`RelayClient`](crate::RelayClient).
///
/// Every field is optional in serialized form: a missing field deserializes
/// to an empty map, and a missing `environment` to [`DEFAULT_ENVIRONMENT`].
/// Contents are not validated: an environment naming an unknown proxy id is
/// accepted here and only surfaces when a URL is built for it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Headers applied to every call unless overridden per call.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Environment name -> routing entry.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentEntry>,
    /// Proxy id -> upstream host entry.
    #[serde(default)]
    pub proxies: HashMap<String, ProxyEntry>,
    /// Initial environment label.
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Routing entry for one environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnvironmentEntry {
    /// Proxy id to route API calls through. `None` falls back to
    /// [`DEFAULT_PROXY_ID`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
}

impl EnvironmentEntry {
    /// Entry routing through the given proxy id.
    pub fn proxy(id: impl Into<String>) -> Self {
        Self {
            api: Some(id.into()),
        }
    }
}

/// Upstream host entry for one proxy id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyEntry {
    /// Upstream host (`host` or `host:port`, no scheme). A missing or empty
    /// value falls back to [`DEFAULT_PROXY_HOST`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
}

impl ProxyEntry {
    /// Entry pointing at the given upstream host.
    pub fn host(host: impl Into<String>) -> Self {
        Self {
            api: Some(host.into()),
        }
    }

    /// The effective upstream host for this entry.
    pub fn host_or_default(&self) -> &str {
        match self.api.as_deref() {
            Some(host) if !host.is_empty() => host,
            _ => DEFAULT_PROXY_HOST,
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            environments: HashMap::new(),
            proxies: HashMap::new(),
            environment: default_environment(),
        }
    }
}

// ---------------------------------------------------------------------------
// Host resolution and loading
// ---------------------------------------------------------------------------

impl RelayConfig {
    /// Resolve the upstream host for an environment.
    ///
    /// Resolution order:
    /// 1. `environments[environment].api` names the proxy id. When the
    ///    environment entry or its id is missing, the id falls back to
    ///    [`DEFAULT_PROXY_ID`].
    /// 2. `proxies[id].api` names the host (missing or empty falls back to
    ///    [`DEFAULT_PROXY_HOST`]). A missing proxy *entry* falls back to
    ///    [`DEFAULT_PROXY_HOST`] only when step 1 fell back too: a proxy id
    ///    that was configured explicitly must exist.
    ///
    /// An empty-string proxy id counts as configured, not missing.
    ///
    /// # Errors
    ///
    /// [`Error::ProxyLookup`] when the environment entry names a proxy id
    /// that has no entry in `proxies`.
    pub fn resolve_proxy_host(&self, environment: &str) -> Result<String> {
        let configured = self
            .environments
            .get(environment)
            .and_then(|entry| entry.api.as_deref());

        match configured {
            Some(proxy_id) => match self.proxies.get(proxy_id) {
                Some(entry) => Ok(entry.host_or_default().to_string()),
                None => Err(Error::ProxyLookup {
                    environment: environment.to_string(),
                    proxy_id: proxy_id.to_string(),
                }),
            },
            None => Ok(self
                .proxies
                .get(DEFAULT_PROXY_ID)
                .map(|entry| entry.host_or_default().to_string())
                .unwrap_or_else(|| DEFAULT_PROXY_HOST.to_string())),
        }
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config_io(path, e.to_string()))?;
        let config = Self::from_json_str(&content)?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn routed_config() -> RelayConfig {
        let mut config = RelayConfig::default();
        config
            .environments
            .insert("stg".to_string(), EnvironmentEntry::proxy("p1"));
        config
            .proxies
            .insert("p1".to_string(), ProxyEntry::host("host1"));
        config
    }

    #[test]
    fn test_resolve_configured_proxy() {
        let config = routed_config();
        assert_eq!(config.resolve_proxy_host("stg").unwrap(), "host1");
    }

    #[test]
    fn test_resolve_unknown_environment_uses_local() {
        let mut config = routed_config();
        config
            .proxies
            .insert("local".to_string(), ProxyEntry::host("dev-box:9000"));

        assert_eq!(config.resolve_proxy_host("qa").unwrap(), "dev-box:9000");
    }

    #[test]
    fn test_resolve_unknown_environment_without_local_entry() {
        let config = routed_config();
        assert_eq!(
            config.resolve_proxy_host("qa").unwrap(),
            DEFAULT_PROXY_HOST
        );
    }

    #[test]
    fn test_resolve_entry_without_proxy_id_uses_local() {
        let mut config = RelayConfig::default();
        config
            .environments
            .insert("stg".to_string(), EnvironmentEntry::default());

        assert_eq!(
            config.resolve_proxy_host("stg").unwrap(),
            DEFAULT_PROXY_HOST
        );
    }

    #[test]
    fn test_resolve_dangling_proxy_id_fails() {
        let mut config = RelayConfig::default();
        config
            .environments
            .insert("prod".to_string(), EnvironmentEntry::proxy("edge"));

        let err = config.resolve_proxy_host("prod").unwrap_err();
        assert!(matches!(
            err,
            Error::ProxyLookup { environment, proxy_id }
                if environment == "prod" && proxy_id == "edge"
        ));
    }

    #[test]
    fn test_resolve_empty_proxy_id_is_configured() {
        // An empty id is a present value: it must resolve against the proxy
        // map, not fall back to "local".
        let mut config = RelayConfig::default();
        config
            .environments
            .insert("stg".to_string(), EnvironmentEntry::proxy(""));
        config
            .proxies
            .insert("local".to_string(), ProxyEntry::host("dev-box:9000"));

        let err = config.resolve_proxy_host("stg").unwrap_err();
        assert!(matches!(err, Error::ProxyLookup { proxy_id, .. } if proxy_id.is_empty()));
    }

    #[test]
    fn test_resolve_empty_host_falls_back() {
        let mut config = RelayConfig::default();
        config
            .environments
            .insert("stg".to_string(), EnvironmentEntry::proxy("p1"));
        config.proxies.insert("p1".to_string(), ProxyEntry::host(""));

        assert_eq!(
            config.resolve_proxy_host("stg").unwrap(),
            DEFAULT_PROXY_HOST
        );
    }

    #[test]
    fn test_proxy_entry_host_or_default() {
        assert_eq!(ProxyEntry::host("h:1").host_or_default(), "h:1");
        assert_eq!(ProxyEntry::host("").host_or_default(), DEFAULT_PROXY_HOST);
        assert_eq!(ProxyEntry::default().host_or_default(), DEFAULT_PROXY_HOST);
    }

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert!(config.headers.is_empty());
        assert!(config.environments.is_empty());
        assert!(config.proxies.is_empty());
        assert_eq!(config.environment, DEFAULT_ENVIRONMENT);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = RelayConfig::from_json_str("{}").unwrap();
        assert_eq!(config.environment, "stg");
        assert!(config.headers.is_empty());
        assert!(config.proxies.is_empty());
    }

    #[test]
    fn test_from_json_str_full() {
        let config = RelayConfig::from_json_str(
            r#"{
                "headers": {"X-Api-Key": "k1"},
                "environments": {"stg": {"api": "p1"}, "prod": {"api": "p2"}},
                "proxies": {"p1": {"api": "host1"}, "p2": {"api": "host2:8443"}},
                "environment": "prod"
            }"#,
        )
        .unwrap();

        assert_eq!(config.headers.get("X-Api-Key").unwrap(), "k1");
        assert_eq!(config.environment, "prod");
        assert_eq!(config.resolve_proxy_host("prod").unwrap(), "host2:8443");
        assert_eq!(config.resolve_proxy_host("stg").unwrap(), "host1");
    }

    #[test]
    fn test_entry_extra_keys_ignored() {
        // Entry sub-maps carry at least an "api" key; anything else is noise.
        let config = RelayConfig::from_json_str(
            r#"{
                "environments": {"stg": {"api": "p1", "web": "w1"}},
                "proxies": {"p1": {"api": "host1", "region": "eu"}}
            }"#,
        )
        .unwrap();

        assert_eq!(config.resolve_proxy_host("stg").unwrap(), "host1");
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.json");
        std::fs::write(
            &path,
            r#"{"proxies": {"local": {"api": "dev-box:9000"}}}"#,
        )
        .unwrap();

        let config = RelayConfig::from_json_file(&path).unwrap();
        assert_eq!(config.environment, "stg");
        assert_eq!(config.resolve_proxy_host("anything").unwrap(), "dev-box:9000");
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = RelayConfig::from_json_file("/tmp/relay_gate_missing_config.json").unwrap_err();
        assert!(matches!(err, Error::ConfigIo { .. }));
    }

    #[test]
    fn test_from_json_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.json");
        std::fs::write(&path, "not json").unwrap();

        let err = RelayConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = routed_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = RelayConfig::from_json_str(&json).unwrap();

        assert_eq!(parsed.environment, config.environment);
        assert_eq!(parsed.environments.get("stg"), config.environments.get("stg"));
        assert_eq!(parsed.proxies.get("p1"), config.proxies.get("p1"));
    }
}
