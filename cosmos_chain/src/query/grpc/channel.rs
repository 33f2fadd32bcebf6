use ibc_proto::Protobuf;
use tendermint_rpc::HttpClient;
use types::ibc_core::ics04_channel::channel::ChannelEnd;
use types::ibc_core::ics23_commitment::merkle::MerkleProof;
use types::ibc_core::ics24_host::identifier::{ChannelId, PortId};
use types::ibc_core::ics24_host::path::{ChannelEndsPath, IBC_QUERY_PATH};

use crate::common::QueryHeight;
use crate::error::Error;
use crate::query::trpc;

pub async fn query_channel(
    trpc_client: &HttpClient,
    channel_id: &ChannelId,
    port_id: &PortId,
    height_query: QueryHeight,
    prove: bool,
) -> Result<(ChannelEnd, Option<MerkleProof>), Error> {
    let abci_query = trpc::abci::abci_query(
        trpc_client,
        IBC_QUERY_PATH.to_string(),
        ChannelEndsPath(port_id.clone(), channel_id.clone()).to_string(),
        height_query.into(),
        prove,
    )
    .await?;

    let channel_end = ChannelEnd::decode_vec(&abci_query.value)
        .map_err(|e| Error::tendermint_protobuf_decode("ChannelEnd".to_string(), e))?;

    if prove {
        Ok((
            channel_end,
            Some(
                abci_query
                    .merkle_proof
                    .ok_or_else(Error::empty_response_proof)?,
            ),
        ))
    } else {
        Ok((channel_end, None))
    }
}
