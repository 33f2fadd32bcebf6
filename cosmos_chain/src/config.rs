use serde::{Deserialize, Serialize};
use utils::file::toml_file;

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasPrice {
    pub price: f64,
    pub denom: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosChainConfig {
    pub chain_id: String,
    pub tendermint_rpc_addr: String,
    pub grpc_addr: String,
    pub account_prefix: String,
    pub gas_price: GasPrice,
    #[serde(default = "default::store_prefix")]
    pub store_prefix: String,
    #[serde(default = "default::hd_path")]
    pub hd_path: String,
    #[serde(default)]
    pub key_path: Option<String>,
    #[serde(default)]
    pub memo_prefix: String,
    #[serde(default = "default::gas_multiplier")]
    pub gas_multiplier: f64,
    #[serde(default = "default::max_gas")]
    pub max_gas: u64,
    #[serde(default = "default::max_msg_num")]
    pub max_msg_num: usize,
    #[serde(default = "default::max_tx_size")]
    pub max_tx_size: usize,
    #[serde(default)]
    pub fee_granter: String,
    #[serde(default = "default::rpc_timeout")]
    pub rpc_timeout: u64,
    /// Upper bound on the time between two blocks, in seconds. Doubles as
    /// the light client's allowed clock drift.
    #[serde(default = "default::max_block_time")]
    pub max_block_time: u64,
    /// Trusting period for clients of this chain, in seconds.
    #[serde(default)]
    pub trusting_period: Option<u64>,
    /// Unbonding period override, in seconds. Queried from the staking
    /// module when absent.
    #[serde(default)]
    pub unbonding_period: Option<u64>,
    #[serde(default)]
    pub trusted_node: bool,
    #[serde(default = "default::ics20_port")]
    pub ics20_port: String,
}

pub fn load_cosmos_chain_config(path: &str) -> Result<CosmosChainConfig, Error> {
    toml_file::toml_file_read(path).map_err(Error::load_cosmos_chain_config)
}

pub mod default {
    use byte_unit::Byte;

    pub fn max_grpc_decoding_size() -> Byte {
        Byte::from_bytes(33554432)
    }

    pub fn store_prefix() -> String {
        "ibc".to_string()
    }

    pub fn hd_path() -> String {
        "m/44'/118'/0'/0/0".to_string()
    }

    pub fn gas_multiplier() -> f64 {
        1.1
    }

    pub fn max_gas() -> u64 {
        400_000
    }

    pub fn max_msg_num() -> usize {
        30
    }

    pub fn max_tx_size() -> usize {
        180_000
    }

    pub fn rpc_timeout() -> u64 {
        10
    }

    pub fn max_block_time() -> u64 {
        30
    }

    pub fn ics20_port() -> String {
        "transfer".to_string()
    }
}

#[cfg(test)]
pub mod cosmos_config_tests {
    use super::CosmosChainConfig;

    #[test]
    pub fn parse_minimal_config_works() {
        let raw = r#"
            chain_id = "ibc-0"
            tendermint_rpc_addr = "http://127.0.0.1:26657"
            grpc_addr = "http://127.0.0.1:9090"
            account_prefix = "cosmos"

            [gas_price]
            price = 0.025
            denom = "stake"
        "#;

        let config: CosmosChainConfig = toml::from_str(raw).expect("config parse error!");

        assert_eq!(config.chain_id, "ibc-0");
        assert_eq!(config.store_prefix, "ibc");
        assert_eq!(config.hd_path, "m/44'/118'/0'/0/0");
        assert_eq!(config.ics20_port, "transfer");
        assert_eq!(config.max_msg_num, 30);
        assert!(config.trusting_period.is_none());
    }
}
