use ibc_proto::ibc::core::commitment::v1::MerkleProof as RawMerkleProof;
use ics23::CommitmentProof;
use prost::Message;
use tendermint::merkle::proof::ProofOps;

use super::error::CommitmentError;

/// A chained ics23 proof: store proof first, then the multi-store proof
/// up to the app hash.
#[derive(Clone, Debug, PartialEq)]
pub struct MerkleProof {
    pub proofs: Vec<CommitmentProof>,
}

impl From<RawMerkleProof> for MerkleProof {
    fn from(raw: RawMerkleProof) -> Self {
        Self { proofs: raw.proofs }
    }
}

impl From<MerkleProof> for RawMerkleProof {
    fn from(proof: MerkleProof) -> Self {
        RawMerkleProof {
            proofs: proof.proofs,
        }
    }
}

/// Decode the proof ops attached to an ABCI query response.
pub fn convert_tm_to_ics_merkle_proof(tm_proof: &ProofOps) -> Result<MerkleProof, CommitmentError> {
    let mut proofs = Vec::with_capacity(tm_proof.ops.len());

    for op in &tm_proof.ops {
        let parsed = CommitmentProof::decode(op.data.as_slice())
            .map_err(CommitmentError::merkle_proof_decode)?;
        proofs.push(parsed);
    }

    if proofs.is_empty() {
        return Err(CommitmentError::empty_merkle_proof());
    }

    Ok(MerkleProof { proofs })
}

#[cfg(test)]
pub mod merkle_tests {
    use ics23::CommitmentProof;
    use prost::Message;
    use tendermint::merkle::proof::{ProofOp, ProofOps};

    use super::convert_tm_to_ics_merkle_proof;

    #[test]
    pub fn convert_proof_ops_works() {
        let commitment_proof = CommitmentProof { proof: None };
        let mut data = vec![];
        commitment_proof.encode(&mut data).unwrap();

        let ops = ProofOps {
            ops: vec![ProofOp {
                field_type: "ics23:iavl".to_string(),
                key: b"commitments".to_vec(),
                data,
            }],
        };

        let proof = convert_tm_to_ics_merkle_proof(&ops).expect("proof convert error!");
        assert_eq!(proof.proofs.len(), 1);
    }

    #[test]
    pub fn empty_proof_ops_fails() {
        let ops = ProofOps { ops: vec![] };
        assert!(convert_tm_to_ics_merkle_proof(&ops).is_err());
    }
}
