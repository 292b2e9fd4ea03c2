//! Error types for the Speisekammer client

use sk_core::StorageLocationId;
use thiserror::Error;

/// Result type for client operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the Speisekammer client
///
/// The variants separate the failure classes callers act on differently:
/// connectivity problems point at the URL or network, HTTP status and
/// community failures point at the credentials, and the precondition
/// variant points at stale location data.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service could not be reached (DNS, refused connection, TLS,
    /// timeout); check the URL and network
    #[error("could not reach {url}: {source}; check the URL and network")]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success HTTP status; check the API token
    #[error("service returned HTTP {status} for {url}; check the API token")]
    Status { status: u16, url: String },

    /// The service answered 2xx but the body was not valid JSON
    #[error("invalid response format from {url}")]
    InvalidResponse { url: String },

    /// The community listing was empty or its first entry had no id;
    /// check the API token
    #[error("community id could not be determined; check the API token")]
    CommunityUnavailable,

    /// The requested storage location is not in the cached list
    #[error("unknown storage location {0}; run refresh_data first")]
    UnknownStorageLocation(StorageLocationId),
}

impl ApiError {
    /// Whether the failure is a transport-level one, as opposed to a
    /// response the service actually produced
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Connectivity { .. })
    }
}
