//! Storage location types

use serde::{Deserialize, Serialize};

/// Integer identifier of a storage location within a community
pub type StorageLocationId = u32;

/// One element of the `/communities/{id}/storage-locations` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    /// Location identifier, unique within the community
    pub id: StorageLocationId,
    /// Human-readable name (e.g. "Pantry")
    pub name: String,
}
