use log::trace;
use tendermint_rpc::HttpClient;

use crate::error::Error;

pub fn tendermint_rpc_client(rpc_addr: &str) -> Result<HttpClient, Error> {
    trace!("tendermint rpc connect");

    HttpClient::new(rpc_addr).map_err(|e| Error::trpc("tendermint rpc connect".to_string(), e))
}
