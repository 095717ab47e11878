//! HTTP client for talking to SearXNG instances

use super::headers::forwarding_headers;
use super::traits::{FailureReason, InstanceClient, Outcome};
use crate::config::UpstreamSettings;
use crate::results::RawSearchResult;
use crate::search::SearchQuery;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::debug;

/// HTTP client wrapper with per-call timeouts and forwarding headers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    settings: Arc<UpstreamSettings>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&UpstreamSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &UpstreamSettings) -> Result<Self> {
        let client = Client::builder().gzip(true).brotli(true).build()?;

        Ok(Self {
            client,
            settings: Arc::new(settings.clone()),
        })
    }

    pub fn settings(&self) -> &UpstreamSettings {
        &self.settings
    }

    /// Fetch `{base}/engines`. Any non-200 status or unparseable body is an error.
    pub async fn fetch_engines(
        &self,
        base_url: &str,
        client_ip: &str,
    ) -> std::result::Result<serde_json::Value, FailureReason> {
        let response = self
            .client
            .get(format!("{}/engines", base_url))
            .headers(forwarding_headers(&self.settings, client_ip))
            .timeout(self.settings.engines_timeout())
            .send()
            .await
            .map_err(classify_error)?;

        if response.status() != StatusCode::OK {
            return Err(FailureReason::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| FailureReason::Malformed(e.to_string()))
    }

    /// GET `url` with the health timeout; up means HTTP 200
    pub async fn probe(&self, url: &str) -> bool {
        let result = self
            .client
            .get(url)
            .header(USER_AGENT, &self.settings.user_agent)
            .timeout(self.settings.health_timeout())
            .send()
            .await;

        match result {
            Ok(response) => {
                debug!("Probe {} returned {}", url, response.status());
                response.status() == StatusCode::OK
            }
            Err(e) => {
                debug!("Probe {} failed: {}", url, e);
                false
            }
        }
    }

    async fn search(
        &self,
        base_url: &str,
        query: &SearchQuery,
        engine: &str,
        client_ip: &str,
    ) -> std::result::Result<RawSearchResult, FailureReason> {
        let response = self
            .client
            .get(format!("{}/search", base_url))
            .headers(forwarding_headers(&self.settings, client_ip))
            .query(&query.upstream_params(engine))
            .timeout(self.settings.search_timeout())
            .send()
            .await
            .map_err(classify_error)?;

        if response.status() != StatusCode::OK {
            return Err(FailureReason::Status(response.status().as_u16()));
        }

        let text = response.text().await.map_err(classify_error)?;
        serde_json::from_str(&text).map_err(|e| FailureReason::Malformed(e.to_string()))
    }
}

#[async_trait]
impl InstanceClient for HttpClient {
    async fn try_instance(
        &self,
        base_url: &str,
        query: &SearchQuery,
        engine: &str,
        client_ip: &str,
    ) -> Outcome {
        match self.search(base_url, query, engine, client_ip).await {
            Ok(result) => Outcome::from_body(result),
            Err(reason) => Outcome::Failure(reason),
        }
    }
}

fn classify_error(err: reqwest::Error) -> FailureReason {
    if err.is_timeout() {
        FailureReason::Timeout
    } else {
        FailureReason::Transport(err.to_string())
    }
}
