//! Request header assembly.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

/// Pick the headers for one call.
///
/// Per-call headers replace the client defaults wholesale; they are not
/// merged with them.
pub fn effective<'a>(
    defaults: &'a HashMap<String, String>,
    overrides: Option<&'a HashMap<String, String>>,
) -> &'a HashMap<String, String> {
    overrides.unwrap_or(defaults)
}

/// Convert configured headers into reqwest form.
///
/// Entries whose name or value is not valid HTTP are skipped with a warning
/// rather than failing the whole call.
pub fn header_map(headers: &HashMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let header_name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => n,
            Err(_) => {
                warn!(header = name.as_str(), "Skipping invalid header name");
                continue;
            }
        };
        let header_value = match HeaderValue::from_str(value) {
            Ok(v) => v,
            Err(_) => {
                warn!(header = name.as_str(), "Skipping invalid header value");
                continue;
            }
        };
        map.insert(header_name, header_value);
    }

    map
}
