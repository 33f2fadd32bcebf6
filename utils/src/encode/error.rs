use bech32::Error as Bech32Error;
use flex_error::{define_error, TraceError};
use prost::EncodeError as ProstEncodeError;

define_error! {
    EncodeError {
        Bech32Encode
            [ TraceError<Bech32Error> ]
            |_| { "encode bech32 error" },
        Bech32Decode
            [ TraceError<Bech32Error> ]
            |_| { "decode bech32 error" },
        ProtobufEncode
            [ TraceError<ProstEncodeError> ]
            |_| { "encode protobuf error" },
    }
}
