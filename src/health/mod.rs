//! Health aggregation over the local instance and public mirrors

use crate::network::HttpClient;
use crate::search::InstanceList;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Healthy,
    Unhealthy,
}

/// Composite health verdict, computed fresh for every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: Status,
    #[serde(rename = "local_instance")]
    pub local_instance_up: bool,
    #[serde(rename = "public_instances_available")]
    pub any_public_instance_up: bool,
    #[serde(rename = "searxng_url")]
    pub configured_local_url: String,
}

impl HealthStatus {
    pub fn new(local_up: bool, public_up: bool, local_url: impl Into<String>) -> Self {
        let status = if local_up || public_up {
            Status::Healthy
        } else {
            Status::Unhealthy
        };

        Self {
            status,
            local_instance_up: local_up,
            any_public_instance_up: public_up,
            configured_local_url: local_url.into(),
        }
    }
}

/// Probes `{local}/healthz` and the root of the first few public mirrors
pub struct HealthAggregator {
    client: HttpClient,
    instances: Arc<InstanceList>,
    probe_count: usize,
}

impl HealthAggregator {
    pub fn new(client: HttpClient, instances: Arc<InstanceList>) -> Self {
        let probe_count = client.settings().health_probe_count;
        Self {
            client,
            instances,
            probe_count,
        }
    }

    pub async fn check_health(&self) -> HealthStatus {
        let local = self.instances.local();
        let local_up = self.client.probe(&format!("{}/healthz", local)).await;

        let mut public_up = false;
        for instance in self.instances.public().iter().take(self.probe_count) {
            if self.client.probe(&format!("{}/", instance)).await {
                public_up = true;
                break;
            }
        }

        debug!("Health: local={} public={}", local_up, public_up);
        HealthStatus::new(local_up, public_up, local)
    }
}
