//! Account configuration and setup-time validation

use serde::{Deserialize, Serialize};
use sk_client::{ApiError, ApiResult, SpeisekammerClient};
use sk_core::{CommunityId, DEFAULT_API_URL};
use tracing::{info, warn};

/// Configuration record supplied by the host at setup time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Base URL of the service; defaults to the hosted instance
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token for the account
    pub api_token: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl AccountConfig {
    /// Configuration for the hosted service with the given token
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_url: default_api_url(),
            api_token: api_token.into(),
        }
    }
}

/// Outcome of a successful configuration validation
#[derive(Debug, Clone)]
pub struct ValidatedAccount {
    /// Display title for the created entry
    pub title: String,
    /// Community the account resolved to
    pub community_id: CommunityId,
}

/// Validate user-supplied configuration by performing the initial fetch once
///
/// A throwaway client confirms the URL is reachable and the token resolves
/// to a community before the host persists anything. Any failure aborts
/// configuration persistence.
pub async fn validate_config(config: &AccountConfig) -> ApiResult<ValidatedAccount> {
    let client = SpeisekammerClient::new(&config.api_url, config.api_token.clone());

    if let Err(err) = client.fetch_initial_data().await {
        warn!(error = %err, "configuration validation failed");
        return Err(err);
    }

    // fetch_initial_data only succeeds with a resolved community id
    let community_id = client
        .community_id()
        .await
        .ok_or(ApiError::CommunityUnavailable)?;
    info!(community = %community_id, "configuration validated");

    Ok(ValidatedAccount {
        title: "Speisekammer".to_string(),
        community_id,
    })
}

/// Map a validation failure to the form error key shown to the user
///
/// Connectivity problems ask the user to check the URL, authentication
/// problems ask for the token.
pub fn form_error_key(err: &ApiError) -> &'static str {
    match err {
        ApiError::Connectivity { .. } => "cannot_connect",
        ApiError::Status {
            status: 401 | 403, ..
        } => "invalid_auth",
        ApiError::CommunityUnavailable => "invalid_auth",
        ApiError::Status { .. } => "cannot_connect",
        ApiError::InvalidResponse { .. } => "unknown",
        ApiError::UnknownStorageLocation(_) => "unknown",
    }
}
