use ibc_proto::ibc::core::channel::v1::{
    query_client::QueryClient, QueryUnreceivedAcksRequest, QueryUnreceivedPacketsRequest,
};
use tonic::transport::Channel;
use types::ibc_core::ics04_channel::packet::Sequence;
use types::ibc_core::ics24_host::identifier::{ChannelId, PortId};

use crate::error::Error;

/// Of `sequences` committed on the counterparty, the ones this chain has not
/// received yet.
pub async fn query_unreceived_packets(
    grpc_client: &mut QueryClient<Channel>,
    port_id: PortId,
    channel_id: ChannelId,
    sequences: Vec<Sequence>,
) -> Result<Vec<Sequence>, Error> {
    let request = QueryUnreceivedPacketsRequest {
        port_id: port_id.to_string(),
        channel_id: channel_id.to_string(),
        packet_commitment_sequences: sequences.into_iter().map(|s| s.into()).collect(),
    };

    let mut response = grpc_client
        .unreceived_packets(request)
        .await
        .map_err(|e| Error::grpc_status(e, "query unreceived packets".to_string()))?
        .into_inner();

    response.sequences.sort_unstable();

    Ok(response.sequences.into_iter().map(|s| s.into()).collect())
}

/// Of the acks written on the counterparty for `sequences`, the ones this
/// chain has not processed yet.
pub async fn query_unreceived_acks(
    grpc_client: &mut QueryClient<Channel>,
    port_id: PortId,
    channel_id: ChannelId,
    sequences: Vec<Sequence>,
) -> Result<Vec<Sequence>, Error> {
    let request = QueryUnreceivedAcksRequest {
        port_id: port_id.to_string(),
        channel_id: channel_id.to_string(),
        packet_ack_sequences: sequences.into_iter().map(|s| s.into()).collect(),
    };

    let mut response = grpc_client
        .unreceived_acks(request)
        .await
        .map_err(|e| Error::grpc_status(e, "query unreceived acks".to_string()))?
        .into_inner();

    response.sequences.sort_unstable();

    Ok(response.sequences.into_iter().map(|s| s.into()).collect())
}
