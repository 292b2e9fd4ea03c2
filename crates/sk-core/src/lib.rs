//! Core types for the Speisekammer integration
//!
//! This crate provides the fundamental types shared by the client and the
//! host-facing glue: CommunityId, StorageLocation, StockAction, StockRequest
//! and ServiceCall, plus the wire-level constants of the remote service.

mod community;
mod service_call;
mod stock;
mod storage;

pub use community::{Community, CommunityId};
pub use service_call::ServiceCall;
pub use stock::{StockAction, StockRequest};
pub use storage::{StorageLocation, StorageLocationId};

/// Integration domain, used to namespace services and entity ids
pub const DOMAIN: &str = "speisekammer";

/// Default base URL of the hosted Speisekammer service
pub const DEFAULT_API_URL: &str = "https://app.speisekammer.app";

/// Path of the community listing endpoint
pub const API_PATH_COMMUNITIES: &str = "/communities";

/// Path of the stock mutation endpoint
pub const API_PATH_STOCK: &str = "/stock";

/// Status code sent with a stock addition
pub const STATUS_ADD: u8 = 1;

/// Status code sent with a stock removal
pub const STATUS_REMOVE: u8 = 2;

/// Build the storage-location listing path for a community
pub fn storage_locations_path(community: &CommunityId) -> String {
    format!("/communities/{}/storage-locations", community)
}

/// Service names exposed by the integration
pub mod services {
    /// Scan a barcoded item in or out of stock
    pub const SERVICE_SCAN_ITEM: &str = "scan_item";

    /// Re-fetch the community id and storage-location list
    pub const SERVICE_REFRESH_DATA: &str = "refresh_data";
}
