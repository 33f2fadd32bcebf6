use std::cmp::min;

use ibc_proto::cosmos::auth::v1beta1::query_client::QueryClient;
use ibc_proto::cosmos::tx::v1beta1::{
    service_client::ServiceClient, Fee, SimulateRequest, SimulateResponse, Tx,
};
use ibc_proto::google::protobuf::Any;
use log::{error, info};
use tonic::transport::Channel;
use utils::encode::protobuf;
use utils::operation::{mul_floor, OperationError};

use crate::account::Secp256k1Account;
use crate::config::CosmosChainConfig;
use crate::error::Error;
use crate::query::grpc::account::query_detail_account;
use crate::tx::create::create_and_sign_tx;
use crate::tx::types::{calculate_fee, GasConfig, Memo};

pub async fn estimate_tx(
    chain_config: &CosmosChainConfig,
    grpc_query_client: &mut QueryClient<Channel>,
    grpc_service_client: &mut ServiceClient<Channel>,
    account_info: &Secp256k1Account,
    tx_memo: &Memo,
    messages: &[Any],
) -> Result<Fee, Error> {
    let account_detail =
        query_detail_account(grpc_query_client, account_info.address().as_str()).await?;

    let (tx, _) = create_and_sign_tx(
        chain_config,
        account_info,
        &account_detail,
        tx_memo,
        messages,
        None,
    )?;

    estimate_tx_fee(chain_config, grpc_service_client, tx).await
}

pub async fn estimate_tx_fee(
    chain_config: &CosmosChainConfig,
    grpc_service_client: &mut ServiceClient<Channel>,
    tx: Tx,
) -> Result<Fee, Error> {
    let gas_info = simulate_tx(grpc_service_client, tx).await.map(|sr| sr.gas_info);

    let gas = match gas_info {
        Ok(Some(gas_info)) => {
            info!(
                "tx simulation successful, gas amount: {:?}",
                gas_info.gas_used
            );

            gas_info.gas_used
        }
        Ok(None) => {
            error!("tx simulation successful but no gas amount used was returned.");
            return Err(Error::cosmos_params("empty simulated gas info".to_string()));
        }
        Err(e) => {
            error!("failed to simulate tx.");
            return Err(e);
        }
    };

    let gas_config = GasConfig::from(chain_config);

    gas_to_fee(&gas_config, gas)
}

pub fn gas_to_fee(gas_config: &GasConfig, gas_amount: u64) -> Result<Fee, Error> {
    let adjusted_gas_limit =
        adjust_estimated_gas(gas_config.gas_multiplier, gas_amount, gas_config.max_gas)
            .map_err(Error::operation)?;

    let coin_fee =
        calculate_fee(adjusted_gas_limit, &gas_config.gas_price).map_err(Error::operation)?;

    Ok(Fee {
        amount: vec![coin_fee],
        gas_limit: adjusted_gas_limit,
        payer: String::new(),
        granter: gas_config.fee_granter.clone(),
    })
}

/// Scale the simulated gas by `gas_multiplier` and bound the result by
/// `max_gas`. The execution-time cost is usually a bit above the simulation.
fn adjust_estimated_gas(
    gas_multiplier: f64,
    gas_amount: u64,
    max_gas: u64,
) -> Result<u64, OperationError> {
    if gas_amount == 0 {
        return Ok(0);
    };

    if gas_multiplier == 1.0 {
        return Ok(min(gas_amount, max_gas));
    }

    let scaled = mul_floor(gas_amount, gas_multiplier)?;
    // Saturate when the product no longer fits a u64.
    let gas = u64::try_from(scaled).unwrap_or(u64::MAX);

    Ok(min(gas, max_gas))
}

pub async fn simulate_tx(
    grpc_service_client: &mut ServiceClient<Channel>,
    tx: Tx,
) -> Result<SimulateResponse, Error> {
    let tx_bytes = protobuf::encode_to_bytes(&tx)
        .map_err(|e| Error::utils_protobuf_encode("tx".to_string(), e))?;

    #[allow(deprecated)]
    let sim_request = SimulateRequest {
        tx_bytes,
        ..Default::default()
    };

    let request = tonic::Request::new(sim_request);
    let response = grpc_service_client
        .simulate(request)
        .await
        .map_err(|e| Error::grpc_status(e, "simulate_tx".to_owned()))?
        .into_inner();

    Ok(response)
}

#[cfg(test)]
pub mod tx_estimate_tests {
    use super::{adjust_estimated_gas, gas_to_fee};
    use crate::config::GasPrice;
    use crate::tx::types::GasConfig;

    fn gas_config() -> GasConfig {
        GasConfig {
            gas_price: GasPrice {
                price: 0.025,
                denom: "stake".to_string(),
            },
            gas_multiplier: 1.1,
            max_gas: 400_000,
            fee_granter: String::new(),
        }
    }

    #[test]
    pub fn adjust_estimated_gas_works() {
        assert_eq!(adjust_estimated_gas(1.1, 0, 400_000).unwrap(), 0);
        assert_eq!(adjust_estimated_gas(1.0, 100_000, 400_000).unwrap(), 100_000);
        assert_eq!(adjust_estimated_gas(1.1, 100_000, 400_000).unwrap(), 110_000);
        assert_eq!(adjust_estimated_gas(1.1, 500_000, 400_000).unwrap(), 400_000);
        assert_eq!(
            adjust_estimated_gas(2.0, u64::MAX, u64::MAX).unwrap(),
            u64::MAX
        );
    }

    #[test]
    pub fn non_finite_multiplier_fails() {
        assert!(adjust_estimated_gas(f64::NAN, 100_000, 400_000).is_err());
    }

    #[test]
    pub fn gas_to_fee_works() {
        let fee = gas_to_fee(&gas_config(), 100_000).expect("fee error!");

        assert_eq!(fee.gas_limit, 110_000);
        assert_eq!(fee.amount.len(), 1);
        assert_eq!(fee.amount[0].amount, "2750");
    }
}
