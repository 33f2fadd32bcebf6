use flex_error::{define_error, TraceError};
use prost::DecodeError;
use utils::encode::error::EncodeError;

define_error! {
    CommitmentError {
        EmptyCommitmentPrefix
            |_| { "commitment prefix cannot be empty" },
        EmptyMerkleProof
            |_| { "merkle proof cannot be empty" },
        MerkleProofDecode
            [ TraceError<DecodeError> ]
            |_| { "failed to decode a commitment proof op" },
        MerkleProofEncode
            [ TraceError<EncodeError> ]
            |_| { "failed to encode merkle proof" },
    }
}
