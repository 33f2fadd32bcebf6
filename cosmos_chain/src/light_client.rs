use std::time::Duration;

use tendermint::node::Id as TendermintNodeId;
use tendermint::Time;
use tendermint_light_client::components::clock::FixedClock;
use tendermint_light_client::components::io::{AtHeight, Io, ProdIo};
use tendermint_light_client::components::scheduler;
use tendermint_light_client::light_client::LightClient as TendermintLightClient;
use tendermint_light_client::state::State as LightClientState;
use tendermint_light_client::store::memory::MemoryStore;
use tendermint_light_client::store::LightStore;
use tendermint_light_client::types::{LightBlock, Status};
use tendermint_light_client::verifier::ProdVerifier;
use tendermint_rpc::HttpClient;
use tracing::trace;
use types::ibc_core::ics02_client::height::Height;
use types::light_clients::ics07_tendermint::client_state::ClientState;
use types::light_clients::ics07_tendermint::header::Header;

use crate::config::CosmosChainConfig;
use crate::error::Error;

/// The light blocks one client update needs: the block at the target height
/// plus whatever intermediate blocks bisection had to verify on the way.
#[derive(Clone, Debug)]
pub struct VerifiedBlocks {
    pub target: LightBlock,
    pub supporting: Vec<LightBlock>,
}

pub fn light_client_io(
    trpc: &HttpClient,
    chain_config: &CosmosChainConfig,
    node_id: &TendermintNodeId,
) -> ProdIo {
    let timeout = Duration::from_secs(chain_config.rpc_timeout);

    ProdIo::new(*node_id, trpc.clone(), Some(timeout))
}

pub fn light_block_at(io: &ProdIo, height: Height) -> Result<LightBlock, Error> {
    io.fetch_light_block(AtHeight::At(height.into()))
        .map_err(Error::fetch_light_block)
}

/// Retrieve the light block at `target_height`. A trusted node hands the
/// block over as-is. Otherwise bisection runs under the client state's
/// options, rooted at the height the on-chain client already trusts, and
/// every block verified along the way is kept as supporting material.
pub fn fetch_verified_blocks(
    trpc: &HttpClient,
    chain_config: &CosmosChainConfig,
    client_state: &ClientState,
    target_height: Height,
    node_id: &TendermintNodeId,
    now: Time,
) -> Result<VerifiedBlocks, Error> {
    let io = light_client_io(trpc, chain_config, node_id);

    if chain_config.trusted_node {
        return Ok(VerifiedBlocks {
            target: light_block_at(&io, target_height)?,
            supporting: vec![],
        });
    }

    let options = client_state
        .as_light_client_options()
        .map_err(|e| Error::client_state("light client options".to_string(), e))?;

    let mut store = MemoryStore::new();
    store.insert(
        light_block_at(&io, client_state.latest_height())?,
        Status::Trusted,
    );
    let mut verification_state = LightClientState::new(store);

    let light_client = TendermintLightClient::new(
        *node_id,
        options,
        FixedClock::new(now),
        scheduler::basic_bisecting_schedule,
        ProdVerifier::default(),
        io,
    );

    let target = light_client
        .verify_to_target(target_height.into(), &mut verification_state)
        .map_err(|e| Error::light_client_verify_block(e))?;

    // The verification trace, ascending and without the target itself, is
    // what the update must submit alongside it.
    let mut supporting = verification_state.get_trace(target.height());
    supporting.sort_by_key(LightBlock::height);
    supporting.dedup_by_key(|block| block.height());
    supporting.retain(|block| block.height() != target.height());

    Ok(VerifiedBlocks { target, supporting })
}

/// Turn verified blocks into the headers a `MsgUpdateClient` batch carries.
/// Each header names the height the client trusts while verifying it,
/// starting from `trusted_height` and advancing block by block. The
/// validator set bound to a trusted height lives in the block directly
/// above it, so one extra fetch per header is unavoidable.
pub fn build_update_headers(
    trpc: &HttpClient,
    chain_config: &CosmosChainConfig,
    node_id: &TendermintNodeId,
    trusted_height: Height,
    blocks: VerifiedBlocks,
) -> Result<(Header, Vec<Header>), Error> {
    trace!(
        trusted = %trusted_height,
        target = %blocks.target.height(),
        "building a header chain with {} supporting blocks",
        blocks.supporting.len()
    );

    let io = light_client_io(trpc, chain_config, node_id);

    let mut chain = blocks.supporting;
    chain.push(blocks.target);

    let mut trusted_height = trusted_height;
    let mut headers = Vec::with_capacity(chain.len());

    for block in chain {
        let trusted_validator_set = light_block_at(&io, trusted_height.increment())?.validators;

        let header = Header {
            signed_header: block.signed_header,
            validator_set: block.validators,
            trusted_height,
            trusted_validator_set,
        };

        // Once submitted, this header is what the next one verifies against.
        trusted_height = header.height();
        headers.push(header);
    }

    let target_header = headers
        .pop()
        .expect("the chain contains at least the target block");

    Ok((target_header, headers))
}
