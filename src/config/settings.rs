//! Settings structures for the proxy configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main settings structure, loadable from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    /// Category name -> ordered engine identifiers
    pub engines: EngineMap,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with the recognized environment variables
    pub fn merge_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SEARXNG_URL") {
            self.upstream.local_url = val;
        }
        if let Some(val) = lookup("PORT") {
            if let Ok(port) = val.trim().parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("DEBUG") {
            self.general.debug = val.trim().eq_ignore_ascii_case("true");
        }
    }

    /// Check the settings and normalize instance URLs
    pub fn validate(&mut self) -> Result<()> {
        self.upstream.local_url = normalize_base_url(&self.upstream.local_url)?;
        self.upstream.public_instances = self
            .upstream
            .public_instances
            .iter()
            .map(|u| normalize_base_url(u))
            .collect::<Result<Vec<_>>>()?;

        if self.upstream.search_timeout == 0
            || self.upstream.engines_timeout == 0
            || self.upstream.health_timeout == 0
        {
            bail!("upstream timeouts must be greater than zero");
        }

        match self.engines.get("general") {
            Some(list) if !list.is_empty() => {}
            _ => bail!("engine mapping must define a non-empty `general` list"),
        }

        Ok(())
    }
}

/// Parse a base URL and strip its trailing slash
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        bail!("instance URL must be an absolute http(s) URL: {}", raw);
    }
    Ok(trimmed.to_string())
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Name shown in the service descriptor
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Golligog SearXNG Backend".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

/// Backend instances and outbound request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    /// Self-hosted SearXNG base URL, always tried first
    pub local_url: String,
    /// Public mirrors, tried in order
    pub public_instances: Vec<String>,
    /// Search request timeout in seconds
    pub search_timeout: u64,
    /// Engine listing timeout in seconds
    pub engines_timeout: u64,
    /// Health probe timeout in seconds
    pub health_timeout: u64,
    /// How many public instances the health check probes
    pub health_probe_count: usize,
    /// Identifying user agent sent upstream
    pub user_agent: String,
    pub forwarded_proto: String,
    pub forwarded_host: String,
}

impl UpstreamSettings {
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout)
    }

    pub fn engines_timeout(&self) -> Duration {
        Duration::from_secs(self.engines_timeout)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout)
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            local_url: "http://localhost:8080".to_string(),
            public_instances: default_public_instances(),
            search_timeout: 10,
            engines_timeout: 5,
            health_timeout: 3,
            health_probe_count: 2,
            user_agent: "Golligog-Flutter-Backend/1.0".to_string(),
            forwarded_proto: "http".to_string(),
            forwarded_host: "localhost".to_string(),
        }
    }
}

/// Category to engine list mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineMap(pub HashMap<String, Vec<String>>);

impl EngineMap {
    pub fn get(&self, category: &str) -> Option<&Vec<String>> {
        self.0.get(category)
    }
}

impl Default for EngineMap {
    fn default() -> Self {
        let defaults: [(&str, &[&str]); 7] = [
            ("general", &["google", "bing", "duckduckgo"]),
            ("images", &["google_images", "bing_images"]),
            ("news", &["google_news", "bing_news"]),
            ("videos", &["google_videos", "bing_videos"]),
            ("science", &["google_scholar", "semantic_scholar"]),
            ("files", &["google_scholar"]),
            ("map", &["openstreetmap"]),
        ];

        let map = defaults
            .into_iter()
            .map(|(category, engines)| {
                (
                    category.to_string(),
                    engines.iter().map(|e| e.to_string()).collect(),
                )
            })
            .collect();

        Self(map)
    }
}

fn default_public_instances() -> Vec<String> {
    [
        "https://search.sapti.me",
        "https://searx.be",
        "https://searx.info",
        "https://search.mdosch.de",
        "https://searx.tiekoetter.com",
        "https://searx.fmac.xyz",
        "https://searx.namejeff.xyz",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
