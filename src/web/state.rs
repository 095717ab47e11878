//! Application state shared across handlers

use crate::config::Settings;
use crate::engines::EngineSelection;
use crate::health::HealthAggregator;
use crate::network::{HttpClient, InstanceClient};
use crate::search::{FallbackRouter, InstanceList};
use std::sync::Arc;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Outbound client for engine listings
    pub client: HttpClient,
    /// Fallback search router
    pub router: Arc<FallbackRouter>,
    /// Health probe aggregator
    pub health: Arc<HealthAggregator>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let client = HttpClient::with_settings(&settings.upstream)?;
        let search_client: Arc<dyn InstanceClient> = Arc::new(client.clone());
        Ok(Self::with_instance_client(settings, client, search_client))
    }

    /// Create state with a custom search client
    pub fn with_instance_client(
        settings: Settings,
        client: HttpClient,
        search_client: Arc<dyn InstanceClient>,
    ) -> Self {
        let instances = Arc::new(InstanceList::from_settings(&settings.upstream));
        let engines = Arc::new(EngineSelection::new(&settings.engines));
        let router = Arc::new(FallbackRouter::new(
            search_client,
            instances.clone(),
            engines,
        ));
        let health = Arc::new(HealthAggregator::new(client.clone(), instances));

        Self {
            settings: Arc::new(settings),
            client,
            router,
            health,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Local SearXNG base URL
    pub fn local_url(&self) -> &str {
        self.router.instances().local()
    }
}
