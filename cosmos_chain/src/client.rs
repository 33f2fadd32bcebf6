use std::time::Duration;

use types::ibc_core::ics24_host::identifier::ClientId;
use types::light_clients::ics07_tendermint::client_state::ClientState;
use types::light_clients::ics07_tendermint::trust_level::TrustThreshold;

use crate::config::CosmosChainConfig;
use crate::error::Error;

/// Trusting period used when the config does not set one.
pub const DEFAULT_TRUSTING_PERIOD: Duration = Duration::from_secs(5_000);

/// Unbonding period used when neither the config nor the staking module
/// supplies one (21 days).
pub const DEFAULT_UNBONDING_PERIOD: Duration = Duration::from_secs(1_814_400);

/// Parameters of a light client to be created for this chain on a
/// counterparty.
#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub trust_threshold: TrustThreshold,
    pub trusting_period: Option<Duration>,
    pub unbonding_period: Option<Duration>,
    pub max_clock_drift: Duration,
}

impl From<&CosmosChainConfig> for ClientSettings {
    fn from(config: &CosmosChainConfig) -> Self {
        Self {
            trust_threshold: TrustThreshold::default(),
            trusting_period: config.trusting_period.map(Duration::from_secs),
            unbonding_period: config.unbonding_period.map(Duration::from_secs),
            max_clock_drift: Duration::from_secs(config.max_block_time),
        }
    }
}

pub fn validate_client_state(client_id: &ClientId, client_state: &ClientState) -> Result<(), Error> {
    if client_state.is_frozen() {
        return Err(Error::frozen_client_state(client_id.clone()));
    }

    Ok(())
}

#[cfg(test)]
pub mod client_settings_tests {
    use std::time::Duration;

    use super::ClientSettings;
    use crate::tx::create::tx_create_tests::test_config;

    #[test]
    pub fn settings_from_config_works() {
        let mut config = test_config();
        config.trusting_period = Some(600);

        let settings = ClientSettings::from(&config);

        assert_eq!(settings.trusting_period, Some(Duration::from_secs(600)));
        assert_eq!(settings.unbonding_period, None);
        assert_eq!(settings.max_clock_drift, Duration::from_secs(30));
    }
}
