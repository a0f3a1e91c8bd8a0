use async_trait::async_trait;

use crate::api::ConsumptionOptions;
use crate::error::{ApiError, Result, StoreError};
use crate::model::{EnergyType, Reading};

/// Trait for types that can produce consumption readings for one energy type.
///
/// The concrete implementation paginates the Octopus API; tests substitute a
/// mock source so the sync flow can be exercised without HTTP.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Retrieves every reading selected by `opts`, in provider order.
    ///
    /// Errors are returned unchanged; no retry happens at this seam.
    async fn collect(
        &self,
        energy_type: EnergyType,
        opts: ConsumptionOptions,
    ) -> Result<Vec<Reading>, ApiError>;
}

/// Storage capability for consumption readings.
///
/// Implementations hold one identity-deduplicated partition per energy type.
/// The store is not safe to share between concurrent processes; callers must
/// ensure single-writer access to the backing file.
pub trait ReadingStore {
    /// Inserts readings into the partition for `energy_type`, returning how
    /// many were newly added. Readings already present by identity count 0,
    /// which is what makes repeated syncs idempotent.
    fn merge(&mut self, readings: Vec<Reading>, energy_type: EnergyType) -> usize;

    /// The reading with the minimum `interval_start`, if the partition is
    /// non-empty.
    fn earliest(&self, energy_type: EnergyType) -> Option<&Reading>;

    /// The reading with the maximum `interval_end`, if the partition is
    /// non-empty.
    fn latest(&self, energy_type: EnergyType) -> Option<&Reading>;

    /// Persists both partitions. Must be all-or-nothing: a failure partway
    /// through must not leave a file that a later load cannot parse.
    fn flush(&mut self) -> Result<(), StoreError>;
}
