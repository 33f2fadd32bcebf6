use std::time::Duration;

use ibc_proto::cosmos::auth::v1beta1::query_client::QueryClient;
use ibc_proto::cosmos::tx::v1beta1::{service_client::ServiceClient, Fee};
use ibc_proto::google::protobuf::Any;
use log::{debug, trace};
use tendermint_rpc::endpoint::broadcast::tx_sync::Response as TxSyncResponse;
use tendermint_rpc::{Client, HttpClient};
use tonic::transport::Channel;
use types::ibc_core::ics02_client::height::Height;
use types::ibc_core::ics24_host::identifier::ChainId;
use types::ibc_events::{ibc_event_try_from_abci_event, IbcEvent, IbcEventWithHeight};
use utils::encode::protobuf;

use crate::account::Secp256k1Account;
use crate::config::CosmosChainConfig;
use crate::error::Error;
use crate::query::grpc::account::query_detail_account;
use crate::query::trpc::tx::tx;
use crate::tx::create::create_and_sign_tx;
use crate::tx::error::TxError;
use crate::tx::estimate::estimate_tx;
use crate::tx::types::{Memo, TxStatus, TxSyncResult};

const WAIT_BACKOFF: Duration = Duration::from_millis(300);
const MAX_WAIT_ATTEMPTS: u32 = 200;

/// The cosmos-sdk error code for a fee below the chain minimum.
const INSUFFICIENT_FEE_CODE: u32 = 13;

pub async fn send_tx(
    chain_config: &CosmosChainConfig,
    trpc_client: &HttpClient,
    grpc_query_client: &mut QueryClient<Channel>,
    grpc_service_client: &mut ServiceClient<Channel>,
    key_account: &Secp256k1Account,
    tx_memo: &Memo,
    messages: &[Any],
) -> Result<TxSyncResult, Error> {
    let fee = estimate_tx(
        chain_config,
        grpc_query_client,
        grpc_service_client,
        key_account,
        tx_memo,
        messages,
    )
    .await?;

    let tx_response = send_tx_with_fee(
        trpc_client,
        grpc_query_client,
        chain_config,
        key_account,
        tx_memo,
        messages,
        fee,
    )
    .await?;

    wait_for_tx_block_commit(
        &ChainId::from_string(&chain_config.chain_id),
        trpc_client,
        &tx_response,
        messages.len(),
    )
    .await
}

pub async fn send_tx_with_fee(
    trpc_client: &HttpClient,
    grpc_query_client: &mut QueryClient<Channel>,
    chain_config: &CosmosChainConfig,
    account_info: &Secp256k1Account,
    tx_memo: &Memo,
    messages: &[Any],
    fee: Fee,
) -> Result<TxSyncResponse, Error> {
    let account_detail =
        query_detail_account(grpc_query_client, account_info.address().as_str()).await?;

    let (_, tx_raw) = create_and_sign_tx(
        chain_config,
        account_info,
        &account_detail,
        tx_memo,
        messages,
        Some(fee),
    )?;
    let tx_bytes = protobuf::encode_to_bytes(&tx_raw)
        .map_err(|e| Error::utils_protobuf_encode("tx raw".to_string(), e))?;

    broadcast_tx_sync(trpc_client, tx_bytes).await
}

pub async fn broadcast_tx_sync(
    trpc_client: &HttpClient,
    tx_bytes: Vec<u8>,
) -> Result<TxSyncResponse, Error> {
    let response = trpc_client
        .broadcast_tx_sync(tx_bytes)
        .await
        .map_err(|e| Error::trpc("broadcast tx sync".to_string(), e))?;

    Ok(response)
}

pub async fn wait_for_tx_block_commit(
    chain_id: &ChainId,
    trpc_client: &HttpClient,
    tx_sync_response: &TxSyncResponse,
    msg_count: usize,
) -> Result<TxSyncResult, Error> {
    if tx_sync_response.code.is_err() {
        let code = tx_sync_response.code.value();
        if code == INSUFFICIENT_FEE_CODE {
            return Err(Error::insufficient_funds(code, tx_sync_response.log.clone()));
        }

        return Err(Error::tx_response(format!(
            "broadcast_tx_sync for {} reports error: code={}, log={}",
            tx_sync_response.hash, code, tx_sync_response.log
        )));
    }

    trace!("waiting for commit of tx {}", tx_sync_response.hash);

    for _ in 0..MAX_WAIT_ATTEMPTS {
        let tx_response_result = tx(trpc_client, tx_sync_response.hash, false).await;

        let Ok(tx_response) = tx_response_result else {
            tokio::time::sleep(WAIT_BACKOFF).await;
            continue;
        };

        let height = Height::new(chain_id.version(), u64::from(tx_response.height))
            .map_err(|e| Error::block_height("tx inclusion height".to_string(), e))?;

        let events: Vec<IbcEventWithHeight> = if tx_response.tx_result.code.is_err() {
            vec![
                IbcEventWithHeight::new(
                    IbcEvent::ChainError(format!(
                        "deliver_tx for {} reports error: code={:?}, log={:?}",
                        tx_response.hash, tx_response.tx_result.code, tx_response.tx_result.log
                    )),
                    height
                );
                msg_count
            ]
        } else {
            tx_response
                .tx_result
                .events
                .iter()
                .filter_map(|event| {
                    ibc_event_try_from_abci_event(event)
                        .ok()
                        .map(|ibc_event| IbcEventWithHeight::new(ibc_event, height))
                })
                .collect()
        };

        debug!(
            "tx {} committed at height {} with {} ibc events",
            tx_response.hash,
            height,
            events.len()
        );

        return Ok(TxSyncResult {
            response: tx_sync_response.clone(),
            events,
            status: TxStatus::ReceivedResponse,
        });
    }

    Err(Error::tx(TxError::broadcast_timed_out(
        tx_sync_response.hash.to_string(),
    )))
}
