//! Engine and instance fallback

use super::models::{InstanceList, SearchQuery};
use crate::engines::EngineSelection;
use crate::error::ProxyError;
use crate::network::{InstanceClient, Outcome};
use crate::results::RawSearchResult;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Tries engines (outer loop) against instances (inner loop) until an
/// instance answers with at least one result.
///
/// For every engine the local instance goes first. Public mirrors are only
/// consulted when the local instance failed or came back empty. The first
/// non-empty answer wins; nothing is merged across attempts.
pub struct FallbackRouter {
    client: Arc<dyn InstanceClient>,
    instances: Arc<InstanceList>,
    engines: Arc<EngineSelection>,
}

impl FallbackRouter {
    pub fn new(
        client: Arc<dyn InstanceClient>,
        instances: Arc<InstanceList>,
        engines: Arc<EngineSelection>,
    ) -> Self {
        Self {
            client,
            instances,
            engines,
        }
    }

    pub fn instances(&self) -> &InstanceList {
        &self.instances
    }

    /// Run the fallback search for `query` on behalf of `client_ip`
    pub async fn search(
        &self,
        query: &SearchQuery,
        client_ip: &str,
    ) -> Result<RawSearchResult, ProxyError> {
        let engines = self.engines.engines_for(query.category().as_str());

        info!(
            "Searching '{}' ({}) over {} engines",
            query.text(),
            query.category(),
            engines.len()
        );

        for engine in engines {
            let local = self.instances.local();
            if let Some(result) = self.attempt(local, query, engine, client_ip).await {
                info!("Got results from {} engine", engine);
                return Ok(result);
            }

            for instance in self.instances.public() {
                if let Some(result) = self.attempt(instance, query, engine, client_ip).await {
                    info!("Got results from {} engine on {}", engine, instance);
                    return Ok(result);
                }
            }
        }

        error!("All instances exhausted for '{}'", query.text());
        Err(ProxyError::AllInstancesUnavailable {
            query: query.text().to_string(),
        })
    }

    async fn attempt(
        &self,
        instance: &str,
        query: &SearchQuery,
        engine: &str,
        client_ip: &str,
    ) -> Option<RawSearchResult> {
        match self
            .client
            .try_instance(instance, query, engine, client_ip)
            .await
        {
            Outcome::Success(result) => Some(result),
            Outcome::EmptySuccess => {
                debug!("Instance {} returned no results for {}", instance, engine);
                None
            }
            Outcome::Failure(reason) => {
                warn!("Error with instance {} ({}): {}", instance, engine, reason);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineMap;
    use crate::network::FailureReason;
    use crate::search::Category;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const LOCAL: &str = "http://local";
    const PUBLIC_A: &str = "https://a.example";
    const PUBLIC_B: &str = "https://b.example";

    /// Scripted client: answers by (instance, engine), failing by default
    #[derive(Default)]
    struct ScriptedClient {
        script: HashMap<(String, String), Outcome>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedClient {
        fn on(mut self, instance: &str, engine: &str, outcome: Outcome) -> Self {
            self.script
                .insert((instance.to_string(), engine.to_string()), outcome);
            self
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InstanceClient for ScriptedClient {
        async fn try_instance(
            &self,
            base_url: &str,
            _query: &SearchQuery,
            engine: &str,
            _client_ip: &str,
        ) -> Outcome {
            let key = (base_url.to_string(), engine.to_string());
            self.calls.lock().unwrap().push(key.clone());
            self.script
                .get(&key)
                .cloned()
                .unwrap_or(Outcome::Failure(FailureReason::Transport(
                    "connection refused".to_string(),
                )))
        }
    }

    fn hit(title: &str) -> Outcome {
        Outcome::Success(
            serde_json::from_value(json!({"results": [{"title": title, "url": "u"}]})).unwrap(),
        )
    }

    fn router(client: Arc<ScriptedClient>) -> FallbackRouter {
        FallbackRouter::new(
            client,
            Arc::new(InstanceList::new(
                LOCAL,
                vec![PUBLIC_A.to_string(), PUBLIC_B.to_string()],
            )),
            Arc::new(EngineSelection::default()),
        )
    }

    fn query(category: Category) -> SearchQuery {
        SearchQuery::new("rust", category).unwrap()
    }

    fn pair(instance: &str, engine: &str) -> (String, String) {
        (instance.to_string(), engine.to_string())
    }

    fn title(result: &RawSearchResult) -> &str {
        result.results().unwrap()[0]["title"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_local_success_short_circuits() {
        let client = Arc::new(ScriptedClient::default().on(LOCAL, "google", hit("local")));
        let result = router(client.clone())
            .search(&query(Category::General), "127.0.0.1")
            .await
            .unwrap();

        assert_eq!(title(&result), "local");
        assert_eq!(client.calls(), vec![pair(LOCAL, "google")]);
    }

    #[tokio::test]
    async fn test_local_empty_falls_back_to_public() {
        let client = Arc::new(
            ScriptedClient::default()
                .on(LOCAL, "google", Outcome::EmptySuccess)
                .on(PUBLIC_A, "google", hit("public")),
        );
        let result = router(client.clone())
            .search(&query(Category::General), "127.0.0.1")
            .await
            .unwrap();

        assert_eq!(title(&result), "public");
        assert_eq!(
            client.calls(),
            vec![pair(LOCAL, "google"), pair(PUBLIC_A, "google")]
        );
    }

    #[tokio::test]
    async fn test_engine_exhausted_across_instances_before_next_engine() {
        let client = Arc::new(ScriptedClient::default().on(PUBLIC_A, "bing", hit("bing")));
        let result = router(client.clone())
            .search(&query(Category::General), "127.0.0.1")
            .await
            .unwrap();

        assert_eq!(title(&result), "bing");
        assert_eq!(
            client.calls(),
            vec![
                pair(LOCAL, "google"),
                pair(PUBLIC_A, "google"),
                pair(PUBLIC_B, "google"),
                pair(LOCAL, "bing"),
                pair(PUBLIC_A, "bing"),
            ]
        );
    }

    #[tokio::test]
    async fn test_all_failing_is_unavailable() {
        let client = Arc::new(ScriptedClient::default());
        let err = router(client.clone())
            .search(&query(Category::General), "127.0.0.1")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProxyError::AllInstancesUnavailable { ref query } if query == "rust"
        ));
        // 3 engines x (local + 2 public)
        assert_eq!(client.calls().len(), 9);
    }

    #[tokio::test]
    async fn test_all_empty_is_unavailable() {
        let mut client = ScriptedClient::default();
        for instance in [LOCAL, PUBLIC_A, PUBLIC_B] {
            for engine in ["google_images", "bing_images"] {
                client = client.on(instance, engine, Outcome::EmptySuccess);
            }
        }
        let client = Arc::new(client);
        let result = router(client.clone())
            .search(&query(Category::Images), "127.0.0.1")
            .await;

        assert!(result.is_err());
        assert_eq!(client.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_category_engines_used() {
        let client = Arc::new(ScriptedClient::default().on(LOCAL, "openstreetmap", hit("map")));
        let result = router(client.clone())
            .search(&query(Category::Map), "127.0.0.1")
            .await
            .unwrap();

        assert_eq!(title(&result), "map");
        assert_eq!(client.calls(), vec![pair(LOCAL, "openstreetmap")]);
    }

    #[tokio::test]
    async fn test_unmapped_category_uses_general_engines() {
        let mut map = EngineMap(HashMap::new());
        map.0
            .insert("general".to_string(), vec!["duckduckgo".to_string()]);

        let client = Arc::new(ScriptedClient::default());
        let router = FallbackRouter::new(
            client.clone(),
            Arc::new(InstanceList::new(LOCAL, vec![])),
            Arc::new(EngineSelection::new(&map)),
        );
        let _ = router.search(&query(Category::Science), "127.0.0.1").await;

        assert_eq!(client.calls(), vec![pair(LOCAL, "duckduckgo")]);
    }
}
