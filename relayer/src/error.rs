use cosmos_chain::error::Error as ChainError;
use flex_error::{define_error, TraceError};
use types::error::TypesError;

define_error! {
    Error {
        Config
            { reason: String }
            |e| { format!("invalid relayer configuration: {}", e.reason) },
        Chain
            [ TraceError<ChainError> ]
            |_| { "chain error" },
        Consensus
            { reason: String }
            |e| { format!("on-chain state contradicts an invariant: {}", e.reason) },
        Handshake
            { step: String, reason: String }
            |e| { format!("handshake step {} rejected: {}", e.step, e.reason) },
        MissingHandshakeEvent
            { step: String }
            |e| { format!("handshake step {} produced no matching event", e.step) },
        Relay
            { context: String }
            [ TraceError<ChainError> ]
            |e| { format!("relaying failed while {}", e.context) },
        Types
            [ TraceError<TypesError> ]
            |_| { "type conversion error" },
        Cancelled
            |_| { "operation cancelled" },
    }
}
