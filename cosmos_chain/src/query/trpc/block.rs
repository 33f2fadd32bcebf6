use tendermint::block::Height;
use tendermint_rpc::{Client, HttpClient};

use crate::error::Error;
use crate::query::types::Block;

pub async fn latest_block(trpc: &HttpClient) -> Result<Block, Error> {
    let block_resp = trpc
        .latest_block()
        .await
        .map_err(|e| Error::latest_block(e))?;

    Ok(Block::from(block_resp))
}

pub async fn block(trpc: &HttpClient, height: Height) -> Result<Block, Error> {
    let block_resp = trpc
        .block(height)
        .await
        .map_err(|e| Error::trpc("block".to_string(), e))?;

    Ok(Block::from(block_resp))
}
