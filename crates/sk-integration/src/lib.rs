//! Host-facing glue for the Speisekammer integration
//!
//! This crate carries everything around the API client that the host
//! automation platform interacts with: the account configuration and its
//! setup-time validation, the integration entry lifecycle, the action
//! dispatcher for the `scan_item` and `refresh_data` services, a
//! notification log for user-visible errors, and the read-only
//! storage-count sensor.

mod config;
mod dispatcher;
mod entry;
mod notify;
mod sensor;

pub use config::{form_error_key, validate_config, AccountConfig, ValidatedAccount};
pub use dispatcher::{ActionDispatcher, ScanItemRequest, ServiceError, ServiceResult};
pub use entry::{IntegrationEntry, SetupError};
pub use notify::{Notification, NotificationLog};
pub use sensor::StorageCountSensor;
