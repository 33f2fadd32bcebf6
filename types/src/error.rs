use core::num::ParseIntError;

use flex_error::{define_error, TraceError};
use subtle_encoding::Error as SubtleEncodingError;

use crate::ibc_core::ics24_host::error::IdentifierError;
use crate::signer::SignerError;

define_error! {
    TypesError {
        InvalidHeight
            { height: String }
            |e| { format!("invalid height: {}", e.height) },
        InvalidHeightResult
            |_| { "height arithmetic underflow" },
        MissingRawField
            { field: String }
            |e| { format!("missing field in raw message: {}", e.field) },
        Ics24Host
            [ TraceError<IdentifierError> ]
            |_| { "identifier error" },
        Signer
            [ TraceError<SignerError> ]
            |_| { "signer error" },
        MissingEventAttribute
            { key: String }
            |e| { format!("missing event attribute: {}", e.key) },
        ParseIntAttribute
            { key: String }
            [ TraceError<ParseIntError> ]
            |e| { format!("event attribute is not an integer: {}", e.key) },
        HexDecode
            { key: String }
            [ TraceError<SubtleEncodingError> ]
            |e| { format!("event attribute is not valid hex: {}", e.key) },
        UnknownEvent
            { kind: String }
            |e| { format!("not an ibc event: {}", e.kind) },
        InvalidTrustThreshold
            { numerator: u64, denominator: u64 }
            |e| { format!("invalid trust threshold: {}/{}", e.numerator, e.denominator) },
        InvalidClientState
            { reason: String }
            |e| { format!("invalid client state: {}", e.reason) },
        InvalidTimestamp
            { reason: String }
            |e| { format!("invalid timestamp: {}", e.reason) },
        InvalidHash
            { reason: String }
            |e| { format!("invalid hash bytes: {}", e.reason) },
        TendermintConversion
            { payload_type: String }
            |e| { format!("tendermint type conversion failed for {}", e.payload_type) },
    }
}
