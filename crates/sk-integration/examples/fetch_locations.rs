//! Smoke test against a real account
//!
//! Reads `SPEISEKAMMER_API_URL` (optional) and `SPEISEKAMMER_API_TOKEN`
//! from the environment, performs the initial fetch and prints the cached
//! storage locations.

use anyhow::{Context, Result};
use sk_core::DEFAULT_API_URL;
use sk_integration::{AccountConfig, IntegrationEntry};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let api_url =
        std::env::var("SPEISEKAMMER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let api_token =
        std::env::var("SPEISEKAMMER_API_TOKEN").context("SPEISEKAMMER_API_TOKEN must be set")?;

    let entry = IntegrationEntry::setup(AccountConfig { api_url, api_token }).await?;

    let client = entry.client();
    println!(
        "community: {}",
        client
            .community_id()
            .await
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<none>".to_string())
    );

    let locations = client.storage_locations().await;
    println!("{} storage locations:", locations.len());
    let mut sorted: Vec<_> = locations.into_iter().collect();
    sorted.sort_by_key(|(id, _)| *id);
    for (id, name) in sorted {
        println!("  {:>4}  {}", id, name);
    }

    Ok(())
}
