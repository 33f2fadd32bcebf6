use http::Uri;
use ibc_proto::cosmos::auth::v1beta1::query_client::QueryClient as AuthQueryClient;
use ibc_proto::cosmos::staking::v1beta1::query_client::QueryClient as StakingQueryClient;
use ibc_proto::cosmos::tx::v1beta1::service_client::ServiceClient as TxServiceClient;
use ibc_proto::ibc::core::channel::v1::query_client::QueryClient as ChannelQueryClient;
use ibc_proto::ibc::core::client::v1::query_client::QueryClient as IbcClientQueryClient;
use ibc_proto::ibc::core::connection::v1::query_client::QueryClient as ConnectionQueryClient;
use log::trace;
use tonic::transport::Channel;

use crate::config::default::max_grpc_decoding_size;
use crate::error::Error;

fn parse_grpc_addr(grpc_addr: &str) -> Result<Uri, Error> {
    grpc_addr
        .parse::<Uri>()
        .map_err(|_| Error::cosmos_params(format!("invalid grpc address: {grpc_addr}")))
}

pub async fn grpc_auth_client(grpc_addr: &str) -> Result<AuthQueryClient<Channel>, Error> {
    trace!("grpc auth client connect");

    let grpc_addr = parse_grpc_addr(grpc_addr)?;
    let auth_client = AuthQueryClient::connect(grpc_addr)
        .await
        .map_err(Error::grpc_transport)?;

    Ok(auth_client.max_decoding_message_size(max_grpc_decoding_size().get_bytes() as usize))
}

pub async fn grpc_staking_client(grpc_addr: &str) -> Result<StakingQueryClient<Channel>, Error> {
    trace!("grpc staking client connect");

    let grpc_addr = parse_grpc_addr(grpc_addr)?;
    let staking_client = StakingQueryClient::connect(grpc_addr)
        .await
        .map_err(Error::grpc_transport)?;

    Ok(staking_client.max_decoding_message_size(max_grpc_decoding_size().get_bytes() as usize))
}

pub async fn grpc_tx_service_client(grpc_addr: &str) -> Result<TxServiceClient<Channel>, Error> {
    trace!("grpc tx service client connect");

    let grpc_addr = parse_grpc_addr(grpc_addr)?;
    let tx_service_client = TxServiceClient::connect(grpc_addr)
        .await
        .map_err(Error::grpc_transport)?;

    Ok(tx_service_client.max_decoding_message_size(max_grpc_decoding_size().get_bytes() as usize))
}

pub async fn grpc_ibcclient_client(grpc_addr: &str) -> Result<IbcClientQueryClient<Channel>, Error> {
    trace!("grpc ibc client query client connect");

    let grpc_addr = parse_grpc_addr(grpc_addr)?;
    let client = IbcClientQueryClient::connect(grpc_addr)
        .await
        .map_err(Error::grpc_transport)?;

    Ok(client.max_decoding_message_size(max_grpc_decoding_size().get_bytes() as usize))
}

pub async fn grpc_connection_client(
    grpc_addr: &str,
) -> Result<ConnectionQueryClient<Channel>, Error> {
    trace!("grpc connection query client connect");

    let grpc_addr = parse_grpc_addr(grpc_addr)?;
    let client = ConnectionQueryClient::connect(grpc_addr)
        .await
        .map_err(Error::grpc_transport)?;

    Ok(client.max_decoding_message_size(max_grpc_decoding_size().get_bytes() as usize))
}

pub async fn grpc_channel_client(grpc_addr: &str) -> Result<ChannelQueryClient<Channel>, Error> {
    trace!("grpc channel query client connect");

    let grpc_addr = parse_grpc_addr(grpc_addr)?;
    let client = ChannelQueryClient::connect(grpc_addr)
        .await
        .map_err(Error::grpc_transport)?;

    Ok(client.max_decoding_message_size(max_grpc_decoding_size().get_bytes() as usize))
}
