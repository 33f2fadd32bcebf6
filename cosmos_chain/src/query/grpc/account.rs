use ibc_proto::cosmos::auth::v1beta1::{
    query_client::QueryClient, BaseAccount, EthAccount, QueryAccountRequest,
};
use log::trace;
use prost::Message;
use tonic::transport::Channel;

use crate::error::Error;

pub async fn query_detail_account(
    grpc_client: &mut QueryClient<Channel>,
    account_address: &str,
) -> Result<BaseAccount, Error> {
    trace!("query detail account for {account_address}");

    let request = tonic::Request::new(QueryAccountRequest {
        address: account_address.to_string(),
    });

    let response = grpc_client.account(request).await;

    let account_resp = match response
        .map_err(|e| Error::grpc_status(e, "query_account".to_owned()))?
        .into_inner()
        .account
    {
        Some(account) => account,
        None => return Err(Error::empty_query_account(account_address.to_string())),
    };

    if account_resp.type_url == "/cosmos.auth.v1beta1.BaseAccount" {
        Ok(BaseAccount::decode(account_resp.value.as_slice())
            .map_err(|e| Error::protobuf_decode("BaseAccount".to_string(), e))?)
    } else if account_resp.type_url.ends_with(".EthAccount") {
        Ok(EthAccount::decode(account_resp.value.as_slice())
            .map_err(|e| Error::protobuf_decode("EthAccount".to_string(), e))?
            .base_account
            .ok_or_else(Error::empty_base_account)?)
    } else {
        Err(Error::unknown_account_type(account_resp.type_url))
    }
}
