//! Read-only sensor exposing the cached storage-location count

use sk_client::SpeisekammerClient;
use sk_core::DOMAIN;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Sensor presenting the number of cached storage locations
///
/// All reads are synchronous snapshots of the client cache; the sensor
/// never triggers network I/O and is not polled. It re-renders when the
/// client announces a refresh on the channel returned by
/// [`updates`](Self::updates).
pub struct StorageCountSensor {
    unique_id: String,
    client: Arc<SpeisekammerClient>,
}

impl StorageCountSensor {
    /// Create the sensor for an integration entry
    pub fn new(client: Arc<SpeisekammerClient>, entry_id: &str) -> Self {
        Self {
            unique_id: format!("{}_{}_storage_count", DOMAIN, entry_id),
            client,
        }
    }

    /// Stable unique id of the sensor entity
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        "Speisekammer storage locations"
    }

    /// Frontend icon
    pub fn icon(&self) -> &'static str {
        "mdi:warehouse"
    }

    /// Unit shown next to the state value
    pub fn unit_of_measurement(&self) -> &'static str {
        "locations"
    }

    /// The sensor is updated via refresh notifications, never polled
    pub fn should_poll(&self) -> bool {
        false
    }

    /// Current state value: the cached location count
    pub async fn native_value(&self) -> usize {
        self.client.storage_location_count().await
    }

    /// Extra attributes: the cached id-to-name map
    pub async fn extra_state_attributes(&self) -> serde_json::Value {
        let locations = self.client.storage_locations().await;
        serde_json::json!({ "storage_locations": locations })
    }

    /// Subscribe to "data changed" notifications from the client
    pub fn updates(&self) -> broadcast::Receiver<()> {
        self.client.subscribe_refresh()
    }
}
