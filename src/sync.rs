//! The sync flow: fetch both energy types, merge into the store, flush once.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::{ConsumptionOptions, OrderBy};
use crate::error::Result;
use crate::model::{EnergyType, ReadingSource, ReadingStore};

/// Coordinates a reading source and a reading store for one full sync.
///
/// Energy types are processed strictly one after another, electricity first,
/// so the provider (the single contended resource) only ever sees one
/// paginated walk at a time.
pub struct Syncer<S> {
    source: Box<dyn ReadingSource>,
    store: S,
    page_size: u32,
    period_from: Option<DateTime<Utc>>,
}

impl<S: ReadingStore> Syncer<S> {
    pub fn new(
        source: Box<dyn ReadingSource>,
        store: S,
        page_size: u32,
        period_from: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            source,
            store,
            page_size,
            period_from,
        }
    }

    /// Runs one sync to completion and reports how many readings each
    /// energy type contributed.
    ///
    /// The store is flushed exactly once, whether fetching succeeds or not:
    /// on failure, everything merged before the error is persisted first and
    /// the fetch error is then re-raised undecorated.
    pub async fn run(&mut self) -> Result<HashMap<EnergyType, usize>> {
        let outcome = self.fetch_all().await;

        info!("Flushing consumption data to disk.");
        if let Err(e) = self.store.flush() {
            if outcome.is_ok() {
                return Err(e.into());
            }
            // The fetch error is the one worth raising; note the flush
            // failure and let it through.
            warn!("Failed to flush store after sync error: {}", e);
        }

        outcome
    }

    async fn fetch_all(&mut self) -> Result<HashMap<EnergyType, usize>> {
        let mut records_added = HashMap::new();

        for energy_type in EnergyType::ALL {
            info!("Retrieving consumption data for {}", energy_type);
            let opts = ConsumptionOptions {
                period_from: self.period_from,
                period_to: None,
                page_size: Some(self.page_size),
                page: Some(1),
                order_by: Some(OrderBy::Forward),
            };

            let readings = self.source.collect(energy_type, opts).await?;
            let added = self.store.merge(readings, energy_type);
            records_added.insert(energy_type, added);
        }

        debug!("Retrieved records: {:?}", records_added);
        Ok(records_added)
    }
}
