//! Search query and related data models

use crate::config::UpstreamSettings;
use crate::error::ProxyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Search categories understood by the proxy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Images,
    News,
    Videos,
    Science,
    Files,
    Map,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Images,
        Category::News,
        Category::Videos,
        Category::Science,
        Category::Files,
        Category::Map,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Images => "images",
            Category::News => "news",
            Category::Videos => "videos",
            Category::Science => "science",
            Category::Files => "files",
            Category::Map => "map",
        }
    }

    /// Parse a category name, `None` if unknown
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Parse a request parameter; unknown names silently become `General`
    pub fn from_param(name: Option<&str>) -> Self {
        name.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated search request, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Trimmed, non-empty query text
    text: String,
    category: Category,
    language: String,
    /// Page number (1-indexed)
    page: u32,
}

impl SearchQuery {
    /// Build a query, rejecting empty or whitespace-only text
    pub fn new(text: &str, category: Category) -> Result<Self, ProxyError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ProxyError::Validation(
                "Query parameter \"q\" is required".to_string(),
            ));
        }

        Ok(Self {
            text: text.to_string(),
            category,
            language: "en".to_string(),
            page: 1,
        })
    }

    /// Set language; blank values keep the default
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        let lang = lang.into();
        if !lang.trim().is_empty() {
            self.language = lang.trim().to_string();
        }
        self
    }

    /// Set page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Query string sent to a SearXNG `/search` endpoint for one engine
    pub fn upstream_params(&self, engine: &str) -> [(&'static str, String); 5] {
        [
            ("q", self.text.clone()),
            ("format", "json".to_string()),
            ("engines", engine.to_string()),
            ("lang", self.language.clone()),
            ("pageno", self.page.to_string()),
        ]
    }
}

/// Parse a `page` parameter; missing, zero or malformed values become 1
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}

/// Ordered backend instances: the local one first, then public mirrors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceList {
    local: String,
    public: Vec<String>,
}

impl InstanceList {
    pub fn new(local: impl Into<String>, public: Vec<String>) -> Self {
        Self {
            local: local.into(),
            public,
        }
    }

    pub fn from_settings(settings: &UpstreamSettings) -> Self {
        Self::new(
            settings.local_url.clone(),
            settings.public_instances.clone(),
        )
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn public(&self) -> &[String] {
        &self.public
    }
}
