//! Stock mutation types for the PUT `/stock` endpoint

use crate::{CommunityId, StorageLocationId, STATUS_ADD, STATUS_REMOVE};
use serde::{Deserialize, Serialize};

/// Direction of a stock mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockAction {
    /// Scan an item into stock
    Add,
    /// Scan an item out of stock
    Remove,
}

impl StockAction {
    /// Numeric status code the service expects in the request body
    pub fn status_code(self) -> u8 {
        match self {
            StockAction::Add => STATUS_ADD,
            StockAction::Remove => STATUS_REMOVE,
        }
    }
}

/// Request body of PUT `/stock`
///
/// `mhd` is serialized as an explicit JSON null when no best-before date is
/// given; the service treats a missing field differently from a null one.
#[derive(Debug, Clone, Serialize)]
pub struct StockRequest {
    pub status: u8,
    pub community: CommunityId,
    pub storage: StorageLocationId,
    pub barcode: String,
    pub mhd: Option<String>,
    pub count: u32,
}
