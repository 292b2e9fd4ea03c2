//! Async client for the Speisekammer inventory service
//!
//! The client owns the HTTP transport, the bearer token, the resolved
//! community id and a cache of storage locations. The cache is only
//! written by [`SpeisekammerClient::fetch_initial_data`] and read through
//! snapshot accessors; a broadcast channel announces each successful
//! refresh to interested readers.

use crate::error::{ApiError, ApiResult};
use reqwest::{header, Method};
use sk_core::{
    storage_locations_path, Community, CommunityId, StorageLocation, StorageLocationId,
    StockAction, StockRequest, API_PATH_COMMUNITIES, API_PATH_STOCK,
};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, instrument, warn};

/// Timeout applied to every request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Capacity of the refresh notification channel
const REFRESH_CHANNEL_CAPACITY: usize = 16;

/// Cached data populated by the initial fetch and replaced on every refresh
#[derive(Debug, Default)]
struct CachedData {
    community_id: Option<CommunityId>,
    storage_locations: HashMap<StorageLocationId, String>,
}

/// Client for the Speisekammer HTTP API
///
/// Construction does no I/O; the client becomes ready once
/// [`fetch_initial_data`](Self::fetch_initial_data) has succeeded. A failed
/// fetch leaves the cache exactly as it was. Concurrent refreshes are not
/// serialized; the last writer wins.
pub struct SpeisekammerClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    cache: RwLock<CachedData>,
    refresh_tx: broadcast::Sender<()>,
}

impl SpeisekammerClient {
    /// Create a new client for the given base URL and bearer token
    ///
    /// The base URL is normalized: trailing slashes are stripped and
    /// `https://` is prepended when no scheme is given.
    pub fn new(base_url: &str, token: impl Into<String>) -> Self {
        let (refresh_tx, _) = broadcast::channel(REFRESH_CHANNEL_CAPACITY);
        Self {
            http: reqwest::Client::new(),
            base_url: normalize_base_url(base_url),
            token: token.into(),
            cache: RwLock::new(CachedData::default()),
            refresh_tx,
        }
    }

    /// The normalized base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the resolved community id, if the initial fetch has succeeded
    pub async fn community_id(&self) -> Option<CommunityId> {
        self.cache.read().await.community_id.clone()
    }

    /// Snapshot of the cached storage locations (id to name)
    pub async fn storage_locations(&self) -> HashMap<StorageLocationId, String> {
        self.cache.read().await.storage_locations.clone()
    }

    /// Number of cached storage locations
    pub async fn storage_location_count(&self) -> usize {
        self.cache.read().await.storage_locations.len()
    }

    /// Whether the initial fetch has completed successfully at least once
    pub async fn is_ready(&self) -> bool {
        self.cache.read().await.community_id.is_some()
    }

    /// Subscribe to refresh notifications
    ///
    /// The channel carries no payload; a message means the cached data
    /// changed and snapshot accessors should be re-read.
    pub fn subscribe_refresh(&self) -> broadcast::Receiver<()> {
        self.refresh_tx.subscribe()
    }

    /// Fetch the community id and storage-location list, replacing the cache
    ///
    /// Resolves the first community returned by the service and loads its
    /// storage locations. The cache is only written after both requests
    /// succeed, so a failure leaves prior data untouched. An empty location
    /// list clears the cache rather than keeping stale entries. On success
    /// a refresh notification is sent to all subscribers.
    #[instrument(skip(self))]
    pub async fn fetch_initial_data(&self) -> ApiResult<()> {
        let value = self
            .request::<()>(Method::GET, API_PATH_COMMUNITIES, None)
            .await?;
        let communities: Vec<Community> =
            serde_json::from_value(value).map_err(|_| ApiError::InvalidResponse {
                url: self.url_for(API_PATH_COMMUNITIES),
            })?;

        let community_id = communities
            .into_iter()
            .next()
            .and_then(|community| community.id)
            .ok_or(ApiError::CommunityUnavailable)?;
        info!(community = %community_id, "community id resolved");

        let path = storage_locations_path(&community_id);
        let value = self.request::<()>(Method::GET, &path, None).await?;
        let locations: Vec<StorageLocation> =
            serde_json::from_value(value).map_err(|_| ApiError::InvalidResponse {
                url: self.url_for(&path),
            })?;

        if locations.is_empty() {
            warn!(community = %community_id, "no storage locations found");
        } else {
            debug!(count = locations.len(), "storage locations loaded");
        }

        {
            let mut cache = self.cache.write().await;
            cache.community_id = Some(community_id);
            cache.storage_locations = locations
                .into_iter()
                .map(|location| (location.id, location.name))
                .collect();
        }

        // No receivers is fine; the notification is best-effort
        let _ = self.refresh_tx.send(());
        Ok(())
    }

    /// Scan an item in or out of stock at a storage location
    ///
    /// The storage id is validated against the cached location list before
    /// any network I/O; an unknown id fails immediately. `mhd_date`, when
    /// given, must already be a `YYYY-MM-DD` string; formatting is the
    /// caller's responsibility. Returns the service's response body.
    #[instrument(skip(self, barcode, mhd_date))]
    pub async fn update_stock(
        &self,
        storage_id: StorageLocationId,
        barcode: &str,
        action: StockAction,
        quantity: u32,
        mhd_date: Option<&str>,
    ) -> ApiResult<serde_json::Value> {
        let community = {
            let cache = self.cache.read().await;
            if !cache.storage_locations.contains_key(&storage_id) {
                return Err(ApiError::UnknownStorageLocation(storage_id));
            }
            // The location gate implies a completed fetch, but keep the
            // invariant explicit: stock mutations require a community id
            cache
                .community_id
                .clone()
                .ok_or(ApiError::CommunityUnavailable)?
        };

        let payload = StockRequest {
            status: action.status_code(),
            community,
            storage: storage_id,
            barcode: barcode.to_string(),
            mhd: mhd_date.map(str::to_string),
            count: quantity,
        };
        debug!(status = payload.status, storage = storage_id, "sending stock update");

        let result = self
            .request(Method::PUT, API_PATH_STOCK, Some(&payload))
            .await?;
        info!(storage = storage_id, "stock update accepted");
        Ok(result)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request and translate the outcome into an [`ApiError`]
    ///
    /// Does not touch the cache.
    async fn request<B: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<serde_json::Value> {
        let url = self.url_for(path);
        debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method, url.as_str())
            .timeout(REQUEST_TIMEOUT)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| {
            warn!(%url, error = %source, "request failed to reach the service");
            ApiError::Connectivity {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "service returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let raw = response.text().await.map_err(|source| ApiError::Connectivity {
            url: url.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|_| ApiError::InvalidResponse { url })
    }
}

/// Strip trailing slashes and default the scheme to `https://`
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}
