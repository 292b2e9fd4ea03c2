//! Integration entry lifecycle

use crate::config::AccountConfig;
use crate::dispatcher::{ActionDispatcher, ServiceResult};
use crate::notify::NotificationLog;
use crate::sensor::StorageCountSensor;
use sk_client::{ApiError, SpeisekammerClient};
use sk_core::ServiceCall;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur while setting up an integration entry
#[derive(Debug, Error)]
pub enum SetupError {
    /// The initial fetch failed; nothing was set up
    #[error("initial data fetch failed: {0}")]
    InitialFetch(#[from] ApiError),
}

/// One configured Speisekammer account, fully set up
///
/// Setup blocks on the initial fetch: the sensor and the services only
/// come up with a resolved community id and populated location data, so a
/// broken configuration never reaches the ready state.
pub struct IntegrationEntry {
    entry_id: String,
    client: Arc<SpeisekammerClient>,
    dispatcher: ActionDispatcher,
    sensor: StorageCountSensor,
    notifications: Arc<NotificationLog>,
}

impl IntegrationEntry {
    /// Set up an entry from a validated configuration
    ///
    /// Performs the initial fetch and fails the whole setup when it fails,
    /// leaving no partially configured entry behind.
    pub async fn setup(config: AccountConfig) -> Result<Self, SetupError> {
        let client = Arc::new(SpeisekammerClient::new(
            &config.api_url,
            config.api_token,
        ));

        if let Err(err) = client.fetch_initial_data().await {
            error!(error = %err, "initial fetch failed, aborting setup");
            return Err(err.into());
        }

        let entry_id = ulid::Ulid::new().to_string();
        let notifications = Arc::new(NotificationLog::new());
        let dispatcher = ActionDispatcher::new(client.clone(), notifications.clone());
        let sensor = StorageCountSensor::new(client.clone(), &entry_id);
        info!(entry_id = %entry_id, "integration entry set up");

        Ok(Self {
            entry_id,
            client,
            dispatcher,
            sensor,
            notifications,
        })
    }

    /// Unique id of this entry
    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    /// The underlying API client
    pub fn client(&self) -> &Arc<SpeisekammerClient> {
        &self.client
    }

    /// The storage-count sensor of this entry
    pub fn sensor(&self) -> &StorageCountSensor {
        &self.sensor
    }

    /// Notifications recorded for this entry
    pub fn notifications(&self) -> &Arc<NotificationLog> {
        &self.notifications
    }

    /// Dispatch a service call against this entry
    pub async fn handle_service_call(&self, call: &ServiceCall) -> ServiceResult {
        self.dispatcher.handle(call).await
    }
}
