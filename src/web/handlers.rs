//! HTTP request handlers

use super::state::AppState;
use crate::error::ProxyError;
use crate::health::HealthStatus;
use crate::results::{normalize, NormalizedResult};
use crate::search::{parse_page, Category, SearchQuery};
use axum::{
    extract::{ConnectInfo, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tracing::warn;

/// Query parameters for search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Category name
    pub category: Option<String>,
    /// Language
    pub lang: Option<String>,
    /// Page number
    pub page: Option<String>,
}

/// Resolve the caller's IP for forwarding: X-Forwarded-For, then
/// X-Real-IP, then the peer address
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    ["x-forwarded-for", "x-real-ip"]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

/// Service descriptor
pub async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": state.instance_name(),
        "version": crate::VERSION,
        "description": "JSON proxy for the SearXNG search API",
        "endpoints": {
            "/api/search": "Search endpoint (GET with ?q=query)",
            "/api/engines": "Get available search engines",
            "/api/health": "Health check"
        }
    }))
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<NormalizedResult>, ProxyError> {
    let query = SearchQuery::new(
        params.q.as_deref().unwrap_or_default(),
        Category::from_param(params.category.as_deref()),
    )?
    .with_lang(params.lang.unwrap_or_else(|| "en".to_string()))
    .with_page(parse_page(params.page.as_deref()));

    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let raw = state.router.search(&query, &ip).await?;

    Ok(Json(normalize(raw)))
}

/// Engine listing handler; failures degrade to an empty list
pub async fn engines(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Json<Value> {
    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));

    match state.client.fetch_engines(state.local_url(), &ip).await {
        Ok(engines) => Json(engines),
        Err(e) => {
            warn!("Error getting engines: {}", e);
            Json(json!([]))
        }
    }
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.health.check_health().await)
}
