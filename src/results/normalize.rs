//! Provenance stripping for upstream responses

use super::types::{NormalizedResult, RawSearchResult, PROVENANCE_KEYS};
use serde_json::{Map, Value};

/// Item fields that survive normalization, with their default when absent
/// or `null`
const KEPT_FIELDS: [(&str, Option<&str>); 6] = [
    ("title", Some("")),
    ("url", Some("")),
    ("content", Some("")),
    ("publishedDate", None),
    ("thumbnail", None),
    ("template", Some("default")),
];

/// Strip engine attribution from a SearXNG response.
///
/// Each result item is reduced to the fields in `KEPT_FIELDS`; absent or
/// `null` fields take their default, or are omitted when they have none.
/// The top-level `engines`, `answers` and `infoboxes` keys are removed. A
/// response without a `results` array is passed through untouched.
pub fn normalize(raw: RawSearchResult) -> NormalizedResult {
    let mut fields = raw.into_fields();

    let items = match fields.remove("results") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            fields.insert("results".to_string(), other);
            return NormalizedResult::from_fields(fields);
        }
        None => return NormalizedResult::from_fields(fields),
    };

    let cleaned: Vec<Value> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(item) => Some(Value::Object(clean_item(item))),
            _ => None,
        })
        .collect();

    fields.insert("results".to_string(), Value::Array(cleaned));
    for key in PROVENANCE_KEYS {
        fields.remove(key);
    }

    NormalizedResult::from_fields(fields)
}

fn clean_item(mut item: Map<String, Value>) -> Map<String, Value> {
    let mut clean = Map::new();
    for (key, default) in KEPT_FIELDS {
        let value = match item.remove(key) {
            Some(Value::Null) | None => default.map(|d| Value::String(d.to_string())),
            Some(value) => Some(value),
        };
        if let Some(value) = value {
            clean.insert(key.to_string(), value);
        }
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawSearchResult {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> RawSearchResult {
        raw(json!({
            "query": "rust",
            "number_of_results": 1200,
            "results": [
                {
                    "title": "Rust",
                    "url": "https://www.rust-lang.org",
                    "content": "A language empowering everyone",
                    "engine": "google",
                    "engines": ["google", "bing"],
                    "score": 4.5,
                    "positions": [1],
                    "category": "general",
                    "publishedDate": "2024-01-01T00:00:00",
                    "thumbnail": "https://img.example/t.png",
                    "template": "images.html"
                },
                {"url": "https://doc.rust-lang.org", "engine": "bing", "parsed_url": ["https"]}
            ],
            "engines": ["google", "bing"],
            "answers": ["42"],
            "infoboxes": [{"infobox": "Rust", "engine": "wikipedia"}],
            "suggestions": ["rust book"],
            "unresponsive_engines": []
        }))
    }

    #[test]
    fn test_engine_and_null_thumbnail_dropped() {
        let normalized = normalize(raw(json!({
            "results": [{"title": "T", "url": "U", "content": "C", "engine": "google", "thumbnail": null}]
        })));

        assert_eq!(
            normalized.results().unwrap()[0],
            json!({"title": "T", "url": "U", "content": "C", "template": "default"})
        );
    }

    #[test]
    fn test_provenance_removed() {
        let normalized = normalize(sample());

        for key in PROVENANCE_KEYS {
            assert!(normalized.get(key).is_none(), "{} survived", key);
        }
        for item in normalized.results().unwrap() {
            let item = item.as_object().unwrap();
            assert!(!item.contains_key("engine"));
            assert!(!item.contains_key("engines"));
            assert!(!item.contains_key("score"));
        }
    }

    #[test]
    fn test_other_top_level_fields_kept() {
        let normalized = normalize(sample());
        assert_eq!(normalized.get("number_of_results"), Some(&json!(1200)));
        assert_eq!(normalized.get("query"), Some(&json!("rust")));
        assert_eq!(normalized.get("suggestions"), Some(&json!(["rust book"])));
    }

    #[test]
    fn test_optional_fields_and_defaults() {
        let normalized = normalize(sample());
        let items = normalized.results().unwrap();

        assert_eq!(items[0]["publishedDate"], "2024-01-01T00:00:00");
        assert_eq!(items[0]["thumbnail"], "https://img.example/t.png");
        assert_eq!(items[0]["template"], "images.html");

        assert_eq!(
            items[1],
            json!({"title": "", "url": "https://doc.rust-lang.org", "content": "", "template": "default"})
        );
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let normalized = normalize(raw(json!({
            "results": [{"title": null, "url": "U", "content": null, "template": null, "publishedDate": null}]
        })));
        assert_eq!(
            normalized.results().unwrap()[0],
            json!({"title": "", "url": "U", "content": "", "template": "default"})
        );
    }

    #[test]
    fn test_missing_results_unchanged() {
        let input = raw(json!({"query": "x", "engines": ["google"], "answers": []}));
        let normalized = normalize(input.clone());
        assert_eq!(normalized.fields(), input.fields());
    }

    #[test]
    fn test_non_object_items_dropped() {
        let normalized = normalize(raw(json!({"results": [1, "two", {"title": "T"}]})));
        assert_eq!(normalized.results().unwrap().len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let once = normalize(sample());
        let twice = normalize(RawSearchResult::from(once.clone()));
        assert_eq!(once, twice);

        let empty = normalize(raw(json!({"results": [], "engines": []})));
        assert_eq!(normalize(RawSearchResult::from(empty.clone())), empty);
    }

    #[test]
    fn test_idempotent_with_null_fields() {
        let once = normalize(raw(json!({
            "results": [{"title": null, "url": "U", "content": "C", "template": null, "thumbnail": null}]
        })));
        let twice = normalize(RawSearchResult::from(once.clone()));

        assert_eq!(once, twice);
        assert_eq!(
            once.results().unwrap()[0],
            json!({"title": "", "url": "U", "content": "C", "template": "default"})
        );
    }
}
