use flex_error::{define_error, TraceError};

use crate::ibc_core::ics23_commitment::error::CommitmentError;
use crate::ibc_core::ics24_host::error::IdentifierError;
use crate::signer::SignerError;

define_error! {
    ConnectionError {
        InvalidIdentifier
            [ TraceError<IdentifierError> ]
            |_| { "connection contains an invalid identifier" },
        MissingCounterparty
            |_| { "missing counterparty in raw connection" },
        MissingCounterpartyPrefix
            |_| { "missing counterparty prefix in raw connection" },
        InvalidState
            { state: i32 }
            |e| { format!("invalid connection state: {}", e.state) },
        EmptyVersions
            |_| { "empty supported versions in raw connection" },
        Commitment
            [ TraceError<CommitmentError> ]
            |_| { "commitment error in raw connection" },
        Signer
            [ TraceError<SignerError> ]
            |_| { "invalid signer" },
    }
}
