use tendermint_rpc::HttpClient;
use types::ibc_core::ics04_channel::packet::Sequence;
use types::ibc_core::ics23_commitment::merkle::MerkleProof;
use types::ibc_core::ics24_host::identifier::{ChannelId, PortId};
use types::ibc_core::ics24_host::path::{AcksPath, CommitmentsPath, IBC_QUERY_PATH};

use crate::common::QueryHeight;
use crate::error::Error;

use super::abci;

pub async fn query_packet_commitment(
    trpc_client: &HttpClient,
    channel_id: &ChannelId,
    port_id: &PortId,
    sequence: &Sequence,
    height_query: QueryHeight,
    prove: bool,
) -> Result<(Vec<u8>, Option<MerkleProof>), Error> {
    let abci_query = abci::abci_query(
        trpc_client,
        IBC_QUERY_PATH.to_string(),
        CommitmentsPath {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence: *sequence,
        }
        .to_string(),
        height_query.into(),
        prove,
    )
    .await?;

    if prove {
        Ok((
            abci_query.value,
            Some(
                abci_query
                    .merkle_proof
                    .ok_or_else(Error::empty_response_proof)?,
            ),
        ))
    } else {
        Ok((abci_query.value, None))
    }
}

pub async fn query_packet_acknowledgement(
    trpc_client: &HttpClient,
    channel_id: &ChannelId,
    port_id: &PortId,
    sequence: &Sequence,
    height_query: QueryHeight,
    prove: bool,
) -> Result<(Vec<u8>, Option<MerkleProof>), Error> {
    let abci_query = abci::abci_query(
        trpc_client,
        IBC_QUERY_PATH.to_string(),
        AcksPath {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            sequence: *sequence,
        }
        .to_string(),
        height_query.into(),
        prove,
    )
    .await?;

    if prove {
        Ok((
            abci_query.value,
            Some(
                abci_query
                    .merkle_proof
                    .ok_or_else(Error::empty_response_proof)?,
            ),
        ))
    } else {
        Ok((abci_query.value, None))
    }
}
