use flex_error::define_error;

use crate::ibc_core::ics02_client::height::Height;
use crate::ibc_core::ics23_commitment::commitment::CommitmentProofBytes;

define_error! {
    ProofError {
        MismatchedProofHeight
            { proof_height: Height, consensus_height: Height }
            |e| {
                format!("consensus proof height {} does not match the proof height {}",
                    e.consensus_height, e.proof_height)
            },
    }
}

/// Proof of the counterparty client's consensus state, carried by the Try and
/// Ack handshake messages next to the client state proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsensusProof {
    proof: CommitmentProofBytes,
    height: Height,
}

impl ConsensusProof {
    pub fn new(proof: CommitmentProofBytes, height: Height) -> Self {
        Self { proof, height }
    }

    pub fn proof(&self) -> &CommitmentProofBytes {
        &self.proof
    }

    pub fn height(&self) -> Height {
        self.height
    }
}

/// The proofs accompanying one IBC message. `height` is the consensus height
/// the proofs verify under, one block above the queried state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proofs {
    object_proof: CommitmentProofBytes,
    client_proof: Option<CommitmentProofBytes>,
    consensus_proof: Option<ConsensusProof>,
    height: Height,
}

impl Proofs {
    pub fn new(
        object_proof: CommitmentProofBytes,
        client_proof: Option<CommitmentProofBytes>,
        consensus_proof: Option<ConsensusProof>,
        height: Height,
    ) -> Result<Self, ProofError> {
        if let Some(consensus) = &consensus_proof {
            if consensus.height() > height {
                return Err(ProofError::mismatched_proof_height(
                    height,
                    consensus.height(),
                ));
            }
        }

        Ok(Self {
            object_proof,
            client_proof,
            consensus_proof,
            height,
        })
    }

    pub fn object_proof(&self) -> &CommitmentProofBytes {
        &self.object_proof
    }

    pub fn client_proof(&self) -> Option<&CommitmentProofBytes> {
        self.client_proof.as_ref()
    }

    pub fn consensus_proof(&self) -> Option<&ConsensusProof> {
        self.consensus_proof.as_ref()
    }

    pub fn height(&self) -> Height {
        self.height
    }
}

#[cfg(test)]
pub mod proofs_tests {
    use super::{ConsensusProof, Proofs};
    use crate::ibc_core::ics02_client::height::Height;
    use crate::ibc_core::ics23_commitment::commitment::CommitmentProofBytes;

    #[test]
    pub fn proofs_accessors_work() {
        let object_proof = CommitmentProofBytes::try_from(vec![1u8, 2, 3]).unwrap();
        let height = Height::new(0, 101).unwrap();

        let proofs = Proofs::new(object_proof.clone(), None, None, height).unwrap();

        assert_eq!(proofs.object_proof(), &object_proof);
        assert_eq!(proofs.height(), height);
        assert!(proofs.client_proof().is_none());
        assert!(proofs.consensus_proof().is_none());
    }

    #[test]
    pub fn consensus_height_above_proof_height_fails() {
        let object_proof = CommitmentProofBytes::try_from(vec![1u8]).unwrap();
        let consensus_proof = ConsensusProof::new(
            CommitmentProofBytes::try_from(vec![2u8]).unwrap(),
            Height::new(0, 200).unwrap(),
        );

        let result = Proofs::new(
            object_proof,
            None,
            Some(consensus_proof),
            Height::new(0, 101).unwrap(),
        );

        assert!(result.is_err());
    }
}
