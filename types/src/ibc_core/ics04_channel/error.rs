use flex_error::{define_error, TraceError};

use crate::error::TypesError;
use crate::ibc_core::ics24_host::error::IdentifierError;
use crate::ibc_core::ics24_host::identifier::ChannelId;

define_error! {
    ChannelError {
        InvalidIdentifier
            [ TraceError<IdentifierError> ]
            |_| { "channel contains an invalid identifier" },
        MissingCounterparty
            |_| { "missing counterparty in raw channel" },
        InvalidState
            { state: i32 }
            |e| { format!("invalid channel state: {}", e.state) },
        InvalidOrdering
            { ordering: i32 }
            |e| { format!("invalid channel ordering: {}", e.ordering) },
        MissingPacket
            |_| { "missing packet in raw message" },
        InvalidPacket
            [ TraceError<TypesError> ]
            |_| { "invalid packet in raw message" },
        MissingChannelId
            |_| { "the channel id is not set" },
        MissingVersion
            |_| { "the channel version is not set" },
        MismatchPort
            { context: String }
            |e| { format!("port mismatch: {}", e.context) },
        MissingChannelOnTarget
            |_| { "the channel does not exist on the target chain" },
        UnexpectedChannelState
            { channel_id: ChannelId, expected: String, actual: String }
            |e| {
                format!("channel {} in unexpected state, expected at most {}, got {}",
                    e.channel_id, e.expected, e.actual)
            },
        MissingChannelInitEvent
            |_| { "missing channel openinit event" },
        MissingChannelTryEvent
            |_| { "missing channel opentry event" },
        MissingChannelAckEvent
            |_| { "missing channel openack event" },
        MissingChannelConfirmEvent
            |_| { "missing channel openconfirm event" },
    }
}
