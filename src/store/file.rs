//! Flat-file JSON implementation of the reading store.
//!
//! On disk the store is a single document:
//! `{"usage_data": {"electricity_usage": [...], "gas_usage": [...]}}` with
//! each partition sorted ascending by `interval_start`. Sorting is purely a
//! serialization concern; in memory each partition is an unordered
//! deduplicated set.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_derive::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::model::{EnergyType, Reading, ReadingStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsageData {
    #[serde(default)]
    electricity_usage: Vec<Reading>,
    #[serde(default)]
    gas_usage: Vec<Reading>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsageFile {
    usage_data: UsageData,
}

/// File-backed reading store.
///
/// Not safe to share between concurrent processes: there is no file
/// locking, so callers must ensure single-writer access to the path.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    electricity: HashSet<Reading>,
    gas: HashSet<Reading>,
}

impl FileStore {
    /// Loads the store from `path`.
    ///
    /// A missing or empty file yields an empty store; a file that exists but
    /// cannot be decoded fails with [`StoreError::Corrupt`], leaving the
    /// caller to decide whether that is fatal.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No store file at {} yet, starting empty.", path.display());
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            info!("Store file {} is empty, starting empty.", path.display());
            return Ok(Self::empty(path));
        }

        let disk: UsageFile =
            serde_json::from_str(&contents).map_err(|e| StoreError::corrupt(&path, e))?;
        debug!(
            "Loaded {} electricity and {} gas readings from {}",
            disk.usage_data.electricity_usage.len(),
            disk.usage_data.gas_usage.len(),
            path.display()
        );

        Ok(Self {
            path,
            electricity: disk.usage_data.electricity_usage.into_iter().collect(),
            gas: disk.usage_data.gas_usage.into_iter().collect(),
        })
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            electricity: HashSet::new(),
            gas: HashSet::new(),
        }
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

    fn sorted(partition: &HashSet<Reading>) -> Vec<Reading> {
        let mut readings: Vec<Reading> = partition.iter().cloned().collect();
        readings.sort_by_key(Reading::interval_start);
        readings
    }
}

impl ReadingStore for FileStore {
    fn merge(&mut self, readings: Vec<Reading>, energy_type: EnergyType) -> usize {
        let partition = self.partition_mut(energy_type);
        let before = partition.len();
        partition.extend(readings);
        let added = partition.len() - before;
        debug!("Added {} {} readings to store.", added, energy_type);
        added
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
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let document = UsageFile {
            usage_data: UsageData {
                electricity_usage: Self::sorted(&self.electricity),
                gas_usage: Self::sorted(&self.gas),
            },
        };

        // Write to a temp file in the target directory, then rename over the
        // final path so a failure mid-write never leaves a truncated store.
        let mut tmp = NamedTempFile::new_in(parent)?;
        serde_json::to_writer(&mut tmp, &document).map_err(StoreError::Encode)?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        info!(
            "Wrote {} electricity and {} gas readings to {}",
            document.usage_data.electricity_usage.len(),
            document.usage_data.gas_usage.len(),
            self.path.display()
        );
        Ok(())
    }
}
