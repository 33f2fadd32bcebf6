use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use cosmos_chain::account::Secp256k1Account;
use cosmos_chain::chain::CosmosChain;
use cosmos_chain::config::{default, CosmosChainConfig, GasPrice};
use serde::{Deserialize, Serialize};
use utils::file::toml_file;

/// The chain registry: a nickname to chain-description mapping, consumed as
/// a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRegistry {
    pub chains: BTreeMap<String, ChainEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainEntry {
    pub chain_id: String,
    pub prefix: String,
    /// Amount and denom in one token, e.g. `0.025ustake`.
    pub gas_price: String,
    #[serde(default = "default::hd_path")]
    pub hd_path: String,
    pub rpc: Vec<String>,
    pub grpc: String,
    #[serde(default)]
    pub faucet: Option<String>,
    #[serde(default)]
    pub ics20_port: Option<String>,
}

impl ChainRegistry {
    pub fn load(path: &str) -> Result<Self> {
        toml_file::toml_file_read(path).with_context(|| format!("cannot read registry {path}"))
    }

    pub fn entry(&self, nickname: &str) -> Result<&ChainEntry> {
        self.chains
            .get(nickname)
            .ok_or_else(|| anyhow!("chain {nickname} is not in the registry"))
    }
}

impl ChainEntry {
    pub fn ics20_port(&self) -> String {
        self.ics20_port
            .clone()
            .unwrap_or_else(default::ics20_port)
    }

    /// Instantiate a signing chain client for this entry, keyed with the
    /// given mnemonic.
    pub fn to_chain(&self, mnemonic: &str) -> Result<CosmosChain> {
        let rpc_addr = self
            .rpc
            .first()
            .ok_or_else(|| anyhow!("chain {} has no rpc endpoint", self.chain_id))?
            .clone();

        let gas_price = parse_gas_price(&self.gas_price)?;

        let config = CosmosChainConfig {
            chain_id: self.chain_id.clone(),
            tendermint_rpc_addr: rpc_addr,
            grpc_addr: self.grpc.clone(),
            account_prefix: self.prefix.clone(),
            gas_price,
            store_prefix: default::store_prefix(),
            hd_path: self.hd_path.clone(),
            key_path: None,
            memo_prefix: String::new(),
            gas_multiplier: default::gas_multiplier(),
            max_gas: default::max_gas(),
            max_msg_num: default::max_msg_num(),
            max_tx_size: default::max_tx_size(),
            fee_granter: String::new(),
            rpc_timeout: default::rpc_timeout(),
            max_block_time: default::max_block_time(),
            trusting_period: None,
            unbonding_period: None,
            trusted_node: false,
            ics20_port: self.ics20_port(),
        };

        let account = Secp256k1Account::from_mnemonic(mnemonic, &config.hd_path, &config.account_prefix)
            .with_context(|| format!("cannot derive the key for {}", self.chain_id))?;

        Ok(CosmosChain::new(config, account))
    }
}

/// Split a `0.025ustake`-style gas price into amount and denom.
pub fn parse_gas_price(raw: &str) -> Result<GasPrice> {
    let split_at = raw
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| anyhow!("gas price {raw} has no denom"))?;

    let (amount, denom) = raw.split_at(split_at);
    let price: f64 = amount
        .parse()
        .with_context(|| format!("gas price {raw} has an invalid amount"))?;

    if denom.is_empty() {
        return Err(anyhow!("gas price {raw} has no denom"));
    }

    Ok(GasPrice {
        price,
        denom: denom.to_string(),
    })
}

#[cfg(test)]
pub mod registry_tests {
    use super::{parse_gas_price, ChainRegistry};

    #[test]
    pub fn parse_gas_price_works() {
        let gas_price = parse_gas_price("0.025ustake").expect("gas price parse error!");
        assert_eq!(gas_price.price, 0.025);
        assert_eq!(gas_price.denom, "ustake");

        assert!(parse_gas_price("0.025").is_err());
        assert!(parse_gas_price("xstake").is_err());
    }

    #[test]
    pub fn registry_parse_works() {
        let raw = r#"
            [chains.local-a]
            chain_id = "ibc-0"
            prefix = "cosmos"
            gas_price = "0.025stake"
            rpc = ["http://127.0.0.1:26657"]
            grpc = "http://127.0.0.1:9090"

            [chains.local-b]
            chain_id = "ibc-1"
            prefix = "cosmos"
            gas_price = "0.025stake"
            rpc = ["http://127.0.0.1:26658"]
            grpc = "http://127.0.0.1:9091"
            ics20_port = "custom-transfer"
        "#;

        let registry: ChainRegistry = toml::from_str(raw).expect("registry parse error!");

        let entry_a = registry.entry("local-a").expect("missing entry!");
        assert_eq!(entry_a.ics20_port(), "transfer");
        assert_eq!(entry_a.hd_path, "m/44'/118'/0'/0/0");

        let entry_b = registry.entry("local-b").expect("missing entry!");
        assert_eq!(entry_b.ics20_port(), "custom-transfer");

        assert!(registry.entry("nope").is_err());
    }
}
