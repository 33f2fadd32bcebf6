use std::time::Duration;

use cosmos_chain::chain::CosmosChain;
use ibc_proto::google::protobuf::Any;
use log::{debug, trace};
use types::ibc_core::ics02_client::height::Height;
use types::ibc_core::ics02_client::msgs::MsgUpdateClient;
use types::ibc_core::ics24_host::identifier::ClientId;
use types::message::Msg;

use crate::error::Error;

const TIP_POLL_BACKOFF: Duration = Duration::from_millis(100);

/// Build the `MsgUpdateClient` batch that brings `client_id` on `dest` up to
/// `target_height` of `src`: one message per supporting header, then the
/// target header. Empty when the consensus state already exists.
pub async fn build_update_client_msgs(
    src: &CosmosChain,
    dest: &CosmosChain,
    client_id: &ClientId,
    target_height: Height,
) -> Result<Vec<Any>, Error> {
    trace!("build update client msgs for {client_id} to height {target_height}");

    if dest.has_consensus_state_at(client_id, target_height).await {
        debug!("consensus state already exists at height {target_height}, skipping update");
        return Ok(vec![]);
    }

    // The source must have produced the target block before its header can
    // be fetched.
    loop {
        let src_tip = src.query_latest_height().await.map_err(Error::chain)?;
        if src_tip >= target_height {
            break;
        }

        tokio::time::sleep(TIP_POLL_BACKOFF).await;
    }

    let client_state = dest
        .validate_client_state(client_id)
        .await
        .map_err(Error::chain)?;

    let verified_blocks = src
        .query_light_blocks(&client_state, target_height)
        .await
        .map_err(Error::chain)?;

    let trusted_height = dest
        .query_trusted_height(target_height, client_id, client_state.latest_height())
        .await
        .map_err(Error::chain)?;

    let (target_header, support_headers) = src
        .build_header_chain(trusted_height, verified_blocks)
        .await
        .map_err(Error::chain)?;

    let signer = dest.get_signer().map_err(Error::chain)?;

    let mut msgs = vec![];
    for header in support_headers {
        msgs.push(MsgUpdateClient::new(
            client_id.clone(),
            header.into(),
            signer.clone(),
        ));
    }

    msgs.push(MsgUpdateClient::new(
        client_id.clone(),
        target_header.into(),
        signer,
    ));

    Ok(msgs.into_iter().map(Msg::to_any).collect())
}
