//! Service call type for invoking integration actions

use serde::{Deserialize, Serialize};

/// A call to one of the integration's services
///
/// Carries the service name and the caller-supplied data object. The host
/// platform owns schema validation of the data; handlers deserialize it
/// into their own request types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCall {
    /// The service name (e.g. "scan_item")
    pub service: String,

    /// Data passed to the service
    pub data: serde_json::Value,
}

impl ServiceCall {
    /// Create a new service call
    pub fn new(service: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            service: service.into(),
            data,
        }
    }

    /// Create a service call with empty data
    pub fn simple(service: impl Into<String>) -> Self {
        Self::new(service, serde_json::Value::Object(Default::default()))
    }

    /// Get a typed value from the call data
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}
