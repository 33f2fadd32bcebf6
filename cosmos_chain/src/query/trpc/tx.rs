use tendermint::Hash;
use tendermint_rpc::endpoint::tx::Response as TxResponse;
use tendermint_rpc::endpoint::tx_search::Response as TxSearchResponse;
use tendermint_rpc::query::Query;
use tendermint_rpc::{Client, HttpClient, Order};

use crate::error::Error;

pub async fn tx(trpc: &HttpClient, hash: Hash, prove: bool) -> Result<TxResponse, Error> {
    trpc.tx(hash, prove)
        .await
        .map_err(|e| Error::trpc("tx".to_string(), e))
}

pub async fn tx_search(
    trpc: &HttpClient,
    query: Query,
    prove: bool,
    page: u32,
    per_page: u8,
    order: Order,
) -> Result<TxSearchResponse, Error> {
    trpc.tx_search(query, prove, page, per_page, order)
        .await
        .map_err(|e| Error::trpc("tx_search".to_string(), e))
}
