//! searxng-proxy: a thin JSON proxy in front of SearXNG
//!
//! Searches go to a self-hosted SearXNG instance first and fall back to
//! public mirrors, engine by engine. Responses are stripped of engine
//! attribution before they reach callers.

pub mod config;
pub mod engines;
pub mod error;
pub mod health;
pub mod network;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::ProxyError;
pub use results::{normalize, NormalizedResult, RawSearchResult};
pub use search::{Category, FallbackRouter, SearchQuery};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
