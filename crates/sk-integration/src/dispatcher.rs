//! Dispatches service calls to the client
//!
//! Two services exist: `scan_item` submits a stock mutation and
//! `refresh_data` re-fetches the community id and storage locations. API
//! failures are recorded in the notification log so the user sees them,
//! and returned to the caller unchanged.

use crate::notify::NotificationLog;
use chrono::NaiveDate;
use serde::Deserialize;
use sk_client::{ApiError, SpeisekammerClient};
use sk_core::services::{SERVICE_REFRESH_DATA, SERVICE_SCAN_ITEM};
use sk_core::{ServiceCall, StockAction, StorageLocationId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

/// Result type for service calls
pub type ServiceResult = Result<Option<serde_json::Value>, ServiceError>;

/// Errors that can occur when dispatching a service call
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No such service
    #[error("service not found: {0}")]
    NotFound(String),

    /// The call data did not match the service schema
    #[error("invalid service data: {0}")]
    InvalidData(String),

    /// The underlying API call failed
    #[error("service call failed: {0}")]
    CallFailed(#[from] ApiError),
}

/// Data of a `scan_item` service call
#[derive(Debug, Clone, Deserialize)]
pub struct ScanItemRequest {
    /// Barcode of the scanned item
    pub barcode: String,
    /// Whether to scan in or out
    pub action: StockAction,
    /// Target storage location
    pub storage_id: StorageLocationId,
    /// Number of items, defaults to 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Optional best-before date
    #[serde(default)]
    pub mhd_date: Option<NaiveDate>,
}

fn default_quantity() -> u32 {
    1
}

/// Routes service calls to the appropriate handler
pub struct ActionDispatcher {
    client: Arc<SpeisekammerClient>,
    notifications: Arc<NotificationLog>,
}

impl ActionDispatcher {
    /// Create a dispatcher for the given client
    pub fn new(client: Arc<SpeisekammerClient>, notifications: Arc<NotificationLog>) -> Self {
        Self {
            client,
            notifications,
        }
    }

    /// Handle one service call
    #[instrument(skip(self, call), fields(service = %call.service))]
    pub async fn handle(&self, call: &ServiceCall) -> ServiceResult {
        match call.service.as_str() {
            SERVICE_SCAN_ITEM => self.handle_scan_item(call).await,
            SERVICE_REFRESH_DATA => self.handle_refresh_data().await,
            other => Err(ServiceError::NotFound(other.to_string())),
        }
    }

    async fn handle_scan_item(&self, call: &ServiceCall) -> ServiceResult {
        let request: ScanItemRequest = serde_json::from_value(call.data.clone())
            .map_err(|err| ServiceError::InvalidData(err.to_string()))?;
        if request.quantity == 0 {
            return Err(ServiceError::InvalidData(
                "quantity must be a positive integer".to_string(),
            ));
        }

        // The client expects an already formatted date string
        let mhd = request
            .mhd_date
            .map(|date| date.format("%Y-%m-%d").to_string());

        match self
            .client
            .update_stock(
                request.storage_id,
                &request.barcode,
                request.action,
                request.quantity,
                mhd.as_deref(),
            )
            .await
        {
            Ok(response) => Ok(Some(response)),
            Err(err) => {
                error!(error = %err, "scan_item failed");
                self.notifications.create(
                    format!("Speisekammer scan failed: {}", err),
                    Some("Speisekammer error".to_string()),
                );
                Err(err.into())
            }
        }
    }

    async fn handle_refresh_data(&self) -> ServiceResult {
        match self.client.fetch_initial_data().await {
            Ok(()) => {
                info!("storage location data refreshed");
                Ok(None)
            }
            Err(err) => {
                error!(error = %err, "refresh_data failed");
                self.notifications.create(
                    format!("Speisekammer refresh failed: {}", err),
                    Some("Speisekammer error".to_string()),
                );
                Err(err.into())
            }
        }
    }
}
