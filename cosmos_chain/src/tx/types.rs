use std::fmt::{Display, Error as FmtError, Formatter};

use ibc_proto::cosmos::base::v1beta1::Coin;
use ibc_proto::cosmos::tx::v1beta1::Fee;
use tendermint_rpc::endpoint::broadcast::tx_sync::Response as TxSyncResponse;
use types::ibc_events::IbcEventWithHeight;
use utils::operation::{mul_ceil, OperationError};

use crate::config::{CosmosChainConfig, GasPrice};
use crate::error::MemoError;

pub const MEMO_MAX_LEN: usize = 256;

#[derive(Clone, Debug, Default)]
pub struct Memo(String);

impl Memo {
    pub fn new(memo: String) -> Result<Self, MemoError> {
        if memo.len() > MEMO_MAX_LEN {
            return Err(MemoError::too_long(memo.len()));
        }

        Ok(Self(memo))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Memo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct GasConfig {
    pub gas_price: GasPrice,
    pub gas_multiplier: f64,
    pub max_gas: u64,
    pub fee_granter: String,
}

impl From<&CosmosChainConfig> for GasConfig {
    fn from(config: &CosmosChainConfig) -> Self {
        Self {
            gas_price: config.gas_price.clone(),
            gas_multiplier: config.gas_multiplier,
            max_gas: config.max_gas,
            fee_granter: config.fee_granter.clone(),
        }
    }
}

impl GasConfig {
    /// The fee paid when the simulation could not produce a gas estimate.
    pub fn max_fee(&self) -> Result<Fee, OperationError> {
        Ok(Fee {
            amount: vec![calculate_fee(self.max_gas, &self.gas_price)?],
            gas_limit: self.max_gas,
            payer: String::new(),
            granter: self.fee_granter.clone(),
        })
    }
}

pub fn calculate_fee(
    adjusted_gas_amount: u64,
    gas_price: &GasPrice,
) -> Result<Coin, OperationError> {
    let fee_amount = mul_ceil(adjusted_gas_amount, gas_price.price)?;

    Ok(Coin {
        denom: gas_price.denom.to_string(),
        amount: fee_amount.to_string(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    ReceivedResponse,
}

#[derive(Clone, Debug)]
pub struct TxSyncResult {
    pub response: TxSyncResponse,
    pub events: Vec<IbcEventWithHeight>,
    pub status: TxStatus,
}

#[cfg(test)]
pub mod tx_types_tests {
    use super::{calculate_fee, Memo, MEMO_MAX_LEN};
    use crate::config::GasPrice;

    #[test]
    pub fn memo_length_bound_works() {
        assert!(Memo::new("relayed".to_string()).is_ok());
        assert!(Memo::new("x".repeat(MEMO_MAX_LEN + 1)).is_err());
    }

    #[test]
    pub fn calculate_fee_works() {
        let gas_price = GasPrice {
            price: 0.025,
            denom: "stake".to_string(),
        };

        let coin = calculate_fee(100_000, &gas_price).expect("fee error!");
        assert_eq!(coin.denom, "stake");
        assert_eq!(coin.amount, "2500");
    }

    #[test]
    pub fn non_finite_gas_price_fails() {
        let gas_price = GasPrice {
            price: f64::NAN,
            denom: "stake".to_string(),
        };

        assert!(calculate_fee(100_000, &gas_price).is_err());
    }
}
