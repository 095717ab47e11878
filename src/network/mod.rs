//! HTTP networking module
//!
//! Outbound requests to SearXNG instances: searches, engine listings and
//! health probes.

mod client;
mod headers;
mod traits;

pub use client::HttpClient;
pub use headers::forwarding_headers;
pub use traits::*;
