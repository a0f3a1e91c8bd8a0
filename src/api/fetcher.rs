use tracing::debug;

use crate::api::client::Client;
use crate::api::query::ConsumptionOptions;
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::model::{EnergyType, Page};

/// Fetches one page of consumption data for one energy type.
///
/// Builds the meter-specific resource path and issues a single GET through
/// [`Client`]. No retries happen here.
pub struct PageFetcher {
    client: Client,
    config: ApiConfig,
}

impl PageFetcher {
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub async fn fetch(
        &self,
        energy_type: EnergyType,
        opts: &ConsumptionOptions,
    ) -> Result<Page, ApiError> {
        let path = self.consumption_path(energy_type);
        debug!(
            "Retrieving {} consumption, path: '{}', options: {:?}",
            energy_type, path, opts
        );
        let body = self.client.get(&path, opts).await?;
        Page::decode(&body)
    }

    fn consumption_path(&self, energy_type: EnergyType) -> String {
        match energy_type {
            EnergyType::Electricity => format!(
                "/electricity-meter-points/{}/meters/{}/consumption/",
                self.config.electricity_mpan, self.config.electricity_serial
            ),
            EnergyType::Gas => format!(
                "/gas-meter-points/{}/meters/{}/consumption/",
                self.config.gas_mprn, self.config.gas_serial
            ),
        }
    }
}
