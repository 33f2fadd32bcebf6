use ibc_proto::ibc::core::connection::v1::{
    query_client::QueryClient as ConnectionQueryClient, QueryConnectionRequest,
};
use ibc_proto::Protobuf;
use tendermint_rpc::HttpClient;
use tonic::transport::Channel;
use types::ibc_core::ics03_connection::connection::ConnectionEnd;
use types::ibc_core::ics23_commitment::merkle::MerkleProof;
use types::ibc_core::ics24_host::identifier::ConnectionId;
use types::ibc_core::ics24_host::path::{ConnectionsPath, IBC_QUERY_PATH};

use crate::common::QueryHeight;
use crate::error::Error;
use crate::query::trpc;

/// A plain read goes through the connection query service; a proven read has
/// to go through ABCI so the response carries a Merkle proof.
pub async fn query_connection(
    grpc_client: &mut ConnectionQueryClient<Channel>,
    trpc_client: &HttpClient,
    connection_id: &ConnectionId,
    height_query: QueryHeight,
    prove: bool,
) -> Result<(ConnectionEnd, Option<MerkleProof>), Error> {
    if prove {
        let abci_query = trpc::abci::abci_query(
            trpc_client,
            IBC_QUERY_PATH.to_string(),
            ConnectionsPath(connection_id.clone()).to_string(),
            height_query.into(),
            prove,
        )
        .await?;

        let connection_end = ConnectionEnd::decode_vec(&abci_query.value)
            .map_err(|e| Error::tendermint_protobuf_decode("ConnectionEnd".to_string(), e))?;

        Ok((
            connection_end,
            Some(
                abci_query
                    .merkle_proof
                    .ok_or_else(Error::empty_response_proof)?,
            ),
        ))
    } else {
        let request = tonic::Request::new(QueryConnectionRequest {
            connection_id: connection_id.to_string(),
        });

        let response = grpc_client.connection(request).await.map_err(|e| {
            if e.code() == tonic::Code::NotFound {
                Error::connection_not_found(connection_id.clone())
            } else {
                Error::grpc_status(e, "query_connection".to_owned())
            }
        })?;

        match response.into_inner().connection {
            Some(raw_connection) => {
                let connection_end =
                    ConnectionEnd::try_from(raw_connection).map_err(Error::connection_error)?;
                Ok((connection_end, None))
            }
            None => Err(Error::connection_not_found(connection_id.clone())),
        }
    }
}
