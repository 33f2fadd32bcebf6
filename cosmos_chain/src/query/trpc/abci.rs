use ibc_proto::google::protobuf::Any;
use ibc_proto::Protobuf;
use tendermint::block::Height as TmHeight;
use tendermint_rpc::{Client, HttpClient};
use types::ibc_core::ics02_client::height::Height;
use types::ibc_core::ics23_commitment::merkle::convert_tm_to_ics_merkle_proof;
use types::ibc_core::ics24_host::identifier::ClientId;
use types::ibc_core::ics24_host::path::{
    ClientConsensusStatePath, ClientStatePath, IBC_QUERY_PATH,
};
use types::light_clients::ics07_tendermint::client_state::ClientState;
use types::light_clients::ics07_tendermint::consensus_state::ConsensusState;

use crate::common::QueryHeight;
use crate::error::Error;
use crate::query::types::AbciQueryResult;

pub async fn abci_query(
    trpc: &HttpClient,
    path: String,
    data: String,
    height: TmHeight,
    prove: bool,
) -> Result<AbciQueryResult, Error> {
    let response = trpc
        .abci_query(Some(path), data, Some(height), prove)
        .await
        .map_err(|e| Error::trpc("abci_query".to_string(), e))?;

    if !response.code.is_ok() {
        return Err(Error::abci_query(response, "fail response".to_string()));
    }

    if prove && response.proof.is_none() {
        return Err(Error::abci_query(response, "empty proof".to_string()));
    }

    let merkle_proof = response
        .proof
        .as_ref()
        .map(convert_tm_to_ics_merkle_proof)
        .transpose()
        .map_err(Error::commitment_error)?;

    Ok(AbciQueryResult {
        value: response.value,
        merkle_proof,
    })
}

pub async fn abci_query_client_state(
    trpc: &HttpClient,
    client_id: &ClientId,
    query_height: QueryHeight,
    prove: bool,
) -> Result<(ClientState, Option<types::ibc_core::ics23_commitment::merkle::MerkleProof>), Error> {
    let client_state_path = ClientStatePath(client_id.clone());
    let abci_query = abci_query(
        trpc,
        IBC_QUERY_PATH.into(),
        client_state_path.to_string(),
        query_height.into(),
        prove,
    )
    .await?;

    let client_state: ClientState = Protobuf::<Any>::decode_vec(&abci_query.value)
        .map_err(|e| Error::tendermint_protobuf_decode("client_state".to_string(), e))?;

    Ok((client_state, abci_query.merkle_proof))
}

pub async fn abci_query_consensus_state(
    trpc: &HttpClient,
    client_id: &ClientId,
    consensus_height: Height,
    query_height: QueryHeight,
    prove: bool,
) -> Result<
    (
        ConsensusState,
        Option<types::ibc_core::ics23_commitment::merkle::MerkleProof>,
    ),
    Error,
> {
    let consensus_state_path = ClientConsensusStatePath {
        client_id: client_id.clone(),
        epoch: consensus_height.revision_number(),
        height: consensus_height.revision_height(),
    };

    let abci_query = abci_query(
        trpc,
        IBC_QUERY_PATH.into(),
        consensus_state_path.to_string(),
        query_height.into(),
        prove,
    )
    .await?;

    let consensus_state: ConsensusState = Protobuf::<Any>::decode_vec(&abci_query.value)
        .map_err(|e| Error::tendermint_protobuf_decode("consensus_state".to_string(), e))?;

    Ok((consensus_state, abci_query.merkle_proof))
}
