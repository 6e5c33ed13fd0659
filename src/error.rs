//! Error types for relay-gate.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for relay-gate.
#[derive(Debug, Error)]
pub enum Error {
    // ── Routing ──────────────────────────────────────────────────────────────
    /// The environment names a proxy id with no entry in the proxy map.
    #[error("No proxy entry '{proxy_id}' for environment '{environment}'")]
    ProxyLookup {
        /// Environment whose configuration named the proxy id.
        environment: String,
        /// Proxy id missing from the proxy map.
        proxy_id: String,
    },

    // ── API ──────────────────────────────────────────────────────────────────
    /// The server answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        message: String,
    },

    // ── Infrastructure ───────────────────────────────────────────────────────
    /// Network/HTTP error from the transport.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file I/O error.
    #[error("Config I/O error at {path}: {message}")]
    ConfigIo {
        /// Path that caused the error.
        path: PathBuf,
        /// Error description.
        message: String,
    },
}

impl Error {
    /// HTTP status carried by an [`Error::Api`], if that is what this is.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for failures rooted in the routing configuration rather
    /// than in the outbound call.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Error::ProxyLookup { .. } | Error::ConfigIo { .. })
    }

    /// Creates a config I/O error.
    #[must_use]
    pub fn config_io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigIo {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        let err = Error::Api {
            status: 502,
            message: "Bad gateway".into(),
        };
        assert_eq!(err.status(), Some(502));

        let err = Error::ProxyLookup {
            environment: "stg".into(),
            proxy_id: "p1".into(),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_is_config() {
        assert!(Error::ProxyLookup {
            environment: "stg".into(),
            proxy_id: "p1".into(),
        }
        .is_config());
        assert!(Error::config_io("/tmp/relay.json", "missing").is_config());

        assert!(!Error::Api {
            status: 500,
            message: "Server error".into(),
        }
        .is_config());
    }

    #[test]
    fn test_error_display() {
        let err = Error::ProxyLookup {
            environment: "prod".into(),
            proxy_id: "edge".into(),
        };
        assert_eq!(
            err.to_string(),
            "No proxy entry 'edge' for environment 'prod'"
        );

        let err = Error::Api {
            status: 404,
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "API error 404: Not found");
    }
}
