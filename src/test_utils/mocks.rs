use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::ConsumptionOptions;
use crate::error::{ApiError, Result, StoreError};
use crate::model::{EnergyType, Reading, ReadingSource, ReadingStore};

/// A reading source with queued per-energy-type responses.
///
/// Each `collect` call pops the next queued response for that energy type;
/// an empty queue yields an empty result. Calls and their options are
/// recorded for assertions.
pub struct MockReadingSource {
    responses: Mutex<HashMap<EnergyType, VecDeque<Result<Vec<Reading>, ApiError>>>>,
    calls: Arc<Mutex<Vec<(EnergyType, ConsumptionOptions)>>>,
}

impl MockReadingSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_readings(self, energy_type: EnergyType, readings: Vec<Reading>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(energy_type)
            .or_default()
            .push_back(Ok(readings));
        self
    }

    pub fn with_failure(self, energy_type: EnergyType, error: ApiError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(energy_type)
            .or_default()
            .push_back(Err(error));
        self
    }

    /// Shared handle to the recorded `(energy_type, options)` calls.
    pub fn calls(&self) -> Arc<Mutex<Vec<(EnergyType, ConsumptionOptions)>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ReadingSource for MockReadingSource {
    async fn collect(
        &self,
        energy_type: EnergyType,
        opts: ConsumptionOptions,
    ) -> Result<Vec<Reading>, ApiError> {
        self.calls.lock().unwrap().push((energy_type, opts));
        self.responses
            .lock()
            .unwrap()
            .entry(energy_type)
            .or_default()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// An in-memory reading store that counts flushes, for sync-flow tests.
pub struct InMemoryStore {
    electricity: HashSet<Reading>,
    gas: HashSet<Reading>,
    flushes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            electricity: HashSet::new(),
            gas: HashSet::new(),
            flushes: 0,
        }
    }

    pub fn len(&self, energy_type: EnergyType) -> usize {
        self.partition(energy_type).len()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    fn partition(&self, energy_type: EnergyType) -> &HashSet<Reading> {
        match energy_type {
            EnergyType::Electricity => &self.electricity,
            EnergyType::Gas => &self.gas,
        }
    }

    fn partition_mut(&mut self, energy_type: EnergyType) -> &mut HashSet<Reading> {
        match energy_type {
            EnergyType::Electricity => &mut self.electricity,
            EnergyType::Gas => &mut self.gas,
        }
    }
}

impl ReadingStore for InMemoryStore {
    fn merge(&mut self, readings: Vec<Reading>, energy_type: EnergyType) -> usize {
        let partition = self.partition_mut(energy_type);
        let before = partition.len();
        partition.extend(readings);
        partition.len() - before
    }

    fn earliest(&self, energy_type: EnergyType) -> Option<&Reading> {
        self.partition(energy_type)
            .iter()
            .min_by_key(|r| r.interval_start())
    }

    fn latest(&self, energy_type: EnergyType) -> Option<&Reading> {
        self.partition(energy_type)
            .iter()
            .max_by_key(|r| r.interval_end())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.flushes += 1;
        Ok(())
    }
}
