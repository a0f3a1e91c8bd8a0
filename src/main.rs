//! Octopus consumption sync
//!
//! Retrieves electricity and gas consumption readings from the Octopus
//! Energy API, deduplicates them against a local flat-file store, and
//! persists the merged result. One invocation runs one full sync.
//!
//! Pagination is strictly sequential with a fixed 500 ms floor between
//! requests; electricity and gas are fetched one after the other. The store
//! file is single-writer only (no locking), so run one sync at a time per
//! cache path.

mod api;
mod config;
mod error;
mod model;
mod store;
mod sync;

#[cfg(test)]
mod test_utils;

use crate::error::Result;
use crate::model::EnergyType;
use crate::store::FileStore;
use crate::sync::Syncer;

#[tokio::main]
async fn main() {
    let app_config = config::load_app_config().expect("Failed to load AppConfig");
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    if let Err(e) = run().await {
        tracing::error!("Sync failed: {:#}", anyhow::Error::from(e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let api_config = config::load_api_config()?;
    let cache_config = config::load_cache_config()?;
    let sync_config = config::load_sync_config()?;
    let period_from = sync_config.period_from()?;

    tracing::info!("Syncing Octopus data to file: {}", cache_config.path);
    let store = FileStore::load(&cache_config.path)?;

    let client = api::Client::new(&api_config);
    let fetcher = api::PageFetcher::new(client, api_config);
    let reader = api::PaginatingReader::new(fetcher);

    let mut syncer = Syncer::new(Box::new(reader), store, sync_config.page_size, period_from);
    let records_added = syncer.run().await?;

    tracing::info!(
        "Added {} electricity records and {} gas records.",
        records_added
            .get(&EnergyType::Electricity)
            .copied()
            .unwrap_or(0),
        records_added.get(&EnergyType::Gas).copied().unwrap_or(0)
    );
    Ok(())
}
