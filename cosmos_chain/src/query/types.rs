use tendermint::block::{Commit, Header, Id};
use tendermint::node::Info as NodeInfo;
use tendermint::validator::Info as ValidatorInfo;
use tendermint_rpc::endpoint::status::SyncInfo;
use tendermint_rpc::endpoint::{block as trpc_block, status as trpc_status};
use types::ibc_core::ics23_commitment::merkle::MerkleProof;

#[derive(Debug, Clone)]
pub struct Block {
    pub id: Id,
    pub header: Header,
    pub last_commit: Option<Commit>,
}

impl From<trpc_block::Response> for Block {
    fn from(value: trpc_block::Response) -> Self {
        Self {
            id: value.block_id,
            header: value.block.header,
            last_commit: value.block.last_commit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TendermintStatus {
    pub node_info: NodeInfo,
    pub sync_info: SyncInfo,
    pub validator_info: ValidatorInfo,
}

impl From<trpc_status::Response> for TendermintStatus {
    fn from(value: trpc_status::Response) -> Self {
        Self {
            node_info: value.node_info,
            sync_info: value.sync_info,
            validator_info: value.validator_info,
        }
    }
}

/// The value and (optionally) the proof carried by an ABCI query response.
#[derive(Debug, Clone)]
pub struct AbciQueryResult {
    pub value: Vec<u8>,
    pub merkle_proof: Option<MerkleProof>,
}
