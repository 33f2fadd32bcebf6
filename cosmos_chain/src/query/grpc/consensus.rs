use ibc_proto::ibc::core::client::v1::{
    query_client::QueryClient as IbcClientQueryClient, QueryConsensusStateHeightsRequest,
};
use log::warn;
use tonic::transport::Channel;
use types::ibc_core::ics02_client::height::Height;
use types::ibc_core::ics24_host::identifier::ClientId;

use crate::common::PageRequest;
use crate::error::Error;

pub async fn query_all_consensus_state_heights(
    grpc_client: &mut IbcClientQueryClient<Channel>,
    client_id: ClientId,
) -> Result<Vec<Height>, Error> {
    let request = tonic::Request::new(QueryConsensusStateHeightsRequest {
        client_id: client_id.to_string(),
        pagination: Some(PageRequest::all().into()),
    });

    let response = grpc_client
        .consensus_state_heights(request)
        .await
        .map_err(|e| Error::grpc_status(e, "query consensus state heights".into()))?
        .into_inner();

    let mut heights: Vec<_> = response
        .consensus_state_heights
        .into_iter()
        .filter_map(|h| {
            Height::try_from(h.clone())
                .map_err(|e| {
                    warn!(
                        "failed to parse consensus state height {:?}. Error: {}",
                        h, e
                    )
                })
                .ok()
        })
        .collect();

    heights.sort_unstable();

    Ok(heights)
}
