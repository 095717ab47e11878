//! Result type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level keys carrying engine provenance
pub const PROVENANCE_KEYS: [&str; 3] = ["engines", "answers", "infoboxes"];

/// A SearXNG JSON response, kept as an opaque bag of fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSearchResult(Map<String, Value>);

impl RawSearchResult {
    /// Result items, `None` when the field is absent or not an array
    pub fn results(&self) -> Option<&Vec<Value>> {
        self.0.get("results").and_then(Value::as_array)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawSearchResult {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A response with engine attribution stripped, ready for callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedResult(Map<String, Value>);

impl NormalizedResult {
    pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn results(&self) -> Option<&Vec<Value>> {
        self.0.get("results").and_then(Value::as_array)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

}

impl From<NormalizedResult> for RawSearchResult {
    fn from(result: NormalizedResult) -> Self {
        Self(result.0)
    }
}
