use tendermint_rpc::{Client, HttpClient};

use crate::error::Error;
use crate::query::types::TendermintStatus;

pub async fn tendermint_status(trpc: &HttpClient) -> Result<TendermintStatus, Error> {
    let status_resp = trpc
        .status()
        .await
        .map_err(|e| Error::trpc("query tendermint status error".to_string(), e))?;

    Ok(TendermintStatus::from(status_resp))
}
