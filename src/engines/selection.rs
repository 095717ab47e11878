//! Category to engine selection

use crate::config::EngineMap;
use crate::search::Category;
use std::collections::HashMap;

/// Fallback list used when the configured map lacks a usable `general` entry
const DEFAULT_ENGINES: [&str; 3] = ["google", "bing", "duckduckgo"];

/// Static, read-only mapping from category to the ordered engines to try
#[derive(Debug, Clone)]
pub struct EngineSelection {
    by_category: HashMap<String, Vec<String>>,
    general: Vec<String>,
}

impl EngineSelection {
    /// Build from a configured engine map. Empty lists are discarded so that
    /// every lookup yields at least one engine.
    pub fn new(map: &EngineMap) -> Self {
        let by_category: HashMap<String, Vec<String>> = map
            .0
            .iter()
            .filter(|(_, engines)| !engines.is_empty())
            .map(|(category, engines)| (category.clone(), engines.clone()))
            .collect();

        let general = by_category
            .get(Category::General.as_str())
            .cloned()
            .unwrap_or_else(|| DEFAULT_ENGINES.iter().map(|e| e.to_string()).collect());

        Self {
            by_category,
            general,
        }
    }

    /// Engines for a category, falling back to the `general` list
    pub fn engines_for(&self, category: &str) -> &[String] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(self.general.as_slice())
    }

    /// Engines for the `general` category
    pub fn general(&self) -> &[String] {
        &self.general
    }

}

impl Default for EngineSelection {
    fn default() -> Self {
        Self::new(&EngineMap::default())
    }
}
