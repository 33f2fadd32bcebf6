use ibc_proto::google::protobuf::{Any, Timestamp as RawTimestamp};
use ibc_proto::ibc::core::commitment::v1::MerkleRoot;
use ibc_proto::ibc::lightclients::tendermint::v1::ConsensusState as RawConsensusState;
use ibc_proto::Protobuf;
use prost::Message;
use tendermint::hash::Algorithm;
use tendermint::time::Time;
use tendermint::Hash;

use crate::error::TypesError;
use crate::ibc_core::ics23_commitment::commitment::CommitmentRoot;

pub const TENDERMINT_CONSENSUS_STATE_TYPE_URL: &str =
    "/ibc.lightclients.tendermint.v1.ConsensusState";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsensusState {
    pub timestamp: Time,
    pub root: CommitmentRoot,
    pub next_validators_hash: Hash,
}

impl ConsensusState {
    pub fn new(timestamp: Time, root: CommitmentRoot, next_validators_hash: Hash) -> Self {
        Self {
            timestamp,
            root,
            next_validators_hash,
        }
    }
}

impl From<&tendermint::block::Header> for ConsensusState {
    fn from(header: &tendermint::block::Header) -> Self {
        Self {
            timestamp: header.time,
            root: CommitmentRoot::from_bytes(header.app_hash.as_ref()),
            next_validators_hash: header.next_validators_hash,
        }
    }
}

impl Protobuf<RawConsensusState> for ConsensusState {}

impl TryFrom<RawConsensusState> for ConsensusState {
    type Error = TypesError;

    fn try_from(raw: RawConsensusState) -> Result<Self, Self::Error> {
        let raw_timestamp = raw
            .timestamp
            .ok_or_else(|| TypesError::missing_raw_field("timestamp".to_string()))?;

        let proto_timestamp = tendermint_proto::google::protobuf::Timestamp {
            seconds: raw_timestamp.seconds,
            nanos: raw_timestamp.nanos,
        };
        let timestamp = Time::try_from(proto_timestamp)
            .map_err(|e| TypesError::invalid_timestamp(e.to_string()))?;

        let root = raw
            .root
            .ok_or_else(|| TypesError::missing_raw_field("root".to_string()))?
            .hash
            .into();

        let next_validators_hash = Hash::from_bytes(Algorithm::Sha256, &raw.next_validators_hash)
            .map_err(|e| TypesError::invalid_hash(e.to_string()))?;

        Ok(Self {
            timestamp,
            root,
            next_validators_hash,
        })
    }
}

impl From<ConsensusState> for RawConsensusState {
    fn from(state: ConsensusState) -> Self {
        let proto_timestamp: tendermint_proto::google::protobuf::Timestamp = state.timestamp.into();

        RawConsensusState {
            timestamp: Some(RawTimestamp {
                seconds: proto_timestamp.seconds,
                nanos: proto_timestamp.nanos,
            }),
            root: Some(MerkleRoot {
                hash: state.root.into_vec(),
            }),
            next_validators_hash: state.next_validators_hash.as_bytes().to_vec(),
        }
    }
}

impl Protobuf<Any> for ConsensusState {}

impl TryFrom<Any> for ConsensusState {
    type Error = TypesError;

    fn try_from(any: Any) -> Result<Self, Self::Error> {
        if any.type_url != TENDERMINT_CONSENSUS_STATE_TYPE_URL {
            return Err(TypesError::tendermint_conversion(format!(
                "unexpected consensus state type url: {}",
                any.type_url
            )));
        }

        let raw = RawConsensusState::decode(any.value.as_slice()).map_err(|_| {
            TypesError::tendermint_conversion("consensus state decode failed".to_string())
        })?;

        raw.try_into()
    }
}

impl From<ConsensusState> for Any {
    fn from(state: ConsensusState) -> Self {
        Any {
            type_url: TENDERMINT_CONSENSUS_STATE_TYPE_URL.to_string(),
            value: Protobuf::<RawConsensusState>::encode_vec(state),
        }
    }
}

#[cfg(test)]
pub mod consensus_state_tests {
    use ibc_proto::google::protobuf::Any;
    use tendermint::hash::Algorithm;
    use tendermint::time::Time;
    use tendermint::Hash;

    use super::ConsensusState;
    use crate::ibc_core::ics23_commitment::commitment::CommitmentRoot;

    pub fn sample_consensus_state() -> ConsensusState {
        ConsensusState::new(
            Time::from_unix_timestamp(1_700_000_000, 0).unwrap(),
            CommitmentRoot::from_bytes(&[7u8; 32]),
            Hash::from_bytes(Algorithm::Sha256, &[9u8; 32]).unwrap(),
        )
    }

    #[test]
    pub fn any_roundtrip_works() {
        let state = sample_consensus_state();
        let any = Any::from(state.clone());
        let back = ConsensusState::try_from(any).expect("consensus state from any error!");

        assert_eq!(state, back);
    }

    #[test]
    pub fn wrong_type_url_fails() {
        let any = Any {
            type_url: "/ibc.lightclients.tendermint.v1.ClientState".to_string(),
            value: vec![],
        };

        assert!(ConsensusState::try_from(any).is_err());
    }
}
