//! Request types passed to the verb methods.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Parameters for a single resource call.
///
/// Only the URL is required. A `body` is serialized as JSON on verbs that
/// send one ([`fetch`](crate::RelayClient::fetch) and
/// [`destroy`](crate::RelayClient::destroy) never do). When `headers` is
/// set it replaces the client's default headers for this call; it is not
/// merged with them.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    /// Target URL, usually built with
    /// [`resource_url`](crate::RelayClient::resource_url).
    pub url: String,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
    /// Optional headers replacing the client defaults for this call.
    pub headers: Option<HashMap<String, String>>,
}

impl ResourceRequest {
    /// Request for the given URL with no body and default headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: None,
            headers: None,
        }
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Replace the default headers for this call.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// URL scheme for [`resource_url`](crate::RelayClient::resource_url).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain HTTP.
    #[default]
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    /// The scheme as it appears in a URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(format!("Unknown scheme: {s}")),
        }
    }
}
