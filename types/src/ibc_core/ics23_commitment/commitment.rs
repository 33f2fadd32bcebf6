use std::fmt::{Debug, Error as FmtError, Formatter};

use ibc_proto::ibc::core::commitment::v1::MerklePrefix;
use serde::{Deserialize, Serialize};
use utils::encode::protobuf;

use super::error::CommitmentError;
use super::merkle::MerkleProof;

/// The key prefix under which the counterparty stores its IBC state,
/// `b"ibc"` for Cosmos-SDK chains.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitmentPrefix {
    bytes: Vec<u8>,
}

impl CommitmentPrefix {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl TryFrom<Vec<u8>> for CommitmentPrefix {
    type Error = CommitmentError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            return Err(CommitmentError::empty_commitment_prefix());
        }

        Ok(Self { bytes })
    }
}

impl Debug for CommitmentPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "CommitmentPrefix({})", String::from_utf8_lossy(&self.bytes))
    }
}

impl From<CommitmentPrefix> for MerklePrefix {
    fn from(prefix: CommitmentPrefix) -> Self {
        MerklePrefix {
            key_prefix: prefix.into_vec(),
        }
    }
}

impl From<MerklePrefix> for CommitmentPrefix {
    fn from(prefix: MerklePrefix) -> Self {
        Self {
            bytes: prefix.key_prefix,
        }
    }
}

/// The app hash a consensus state commits to.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitmentRoot {
    bytes: Vec<u8>,
}

impl CommitmentRoot {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for CommitmentRoot {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl Debug for CommitmentRoot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "CommitmentRoot({})", hex_str(&self.bytes))
    }
}

/// An encoded `MerkleProof`, carried opaquely inside handshake and packet
/// messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitmentProofBytes {
    bytes: Vec<u8>,
}

impl TryFrom<Vec<u8>> for CommitmentProofBytes {
    type Error = CommitmentError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            return Err(CommitmentError::empty_merkle_proof());
        }

        Ok(Self { bytes })
    }
}

impl TryFrom<MerkleProof> for CommitmentProofBytes {
    type Error = CommitmentError;

    fn try_from(proof: MerkleProof) -> Result<Self, Self::Error> {
        let raw: ibc_proto::ibc::core::commitment::v1::MerkleProof = proof.into();
        let bytes =
            protobuf::encode_to_bytes(&raw).map_err(CommitmentError::merkle_proof_encode)?;

        Self::try_from(bytes)
    }
}

impl From<CommitmentProofBytes> for Vec<u8> {
    fn from(proof: CommitmentProofBytes) -> Self {
        proof.bytes
    }
}

impl AsRef<[u8]> for CommitmentProofBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

fn hex_str(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
pub mod commitment_tests {
    use super::{CommitmentPrefix, CommitmentProofBytes};

    #[test]
    pub fn empty_prefix_fails() {
        assert!(CommitmentPrefix::try_from(vec![]).is_err());
        assert!(CommitmentPrefix::try_from(b"ibc".to_vec()).is_ok());
    }

    #[test]
    pub fn empty_proof_bytes_fails() {
        assert!(CommitmentProofBytes::try_from(vec![]).is_err());

        let proof = CommitmentProofBytes::try_from(vec![1, 2, 3]).unwrap();
        assert_eq!(Vec::<u8>::from(proof), vec![1, 2, 3]);
    }
}
