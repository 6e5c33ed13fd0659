//! HTTP transport for the resource client.

pub mod headers;
pub mod http;
