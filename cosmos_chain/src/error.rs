use flex_error::{define_error, DisplayOnly, TraceError};
use prost::DecodeError;
use tendermint_light_client::components::io::IoError as LightClientIoError;
use tendermint_light_client::errors::Error as LightClientError;
use tendermint_proto::Error as TendermintProtoError;
use tendermint_rpc::endpoint::abci_query::AbciQuery;
use tendermint_rpc::error::Error as TrpcError;
use tonic::{transport::Error as TransportError, Status as GrpcStatus};
use types::error::TypesError;
use types::ibc_core::ics03_connection::error::ConnectionError;
use types::ibc_core::ics04_channel::error::ChannelError;
use types::ibc_core::ics23_commitment::error::CommitmentError;
use types::ibc_core::ics24_host::error::IdentifierError;
use types::ibc_core::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use types::proofs::ProofError;
use types::signer::SignerError;
use utils::encode::error::EncodeError as UtilsEncodeError;
use utils::file::error::FileError;
use utils::operation::OperationError;

use crate::tx::error::TxError;

define_error! {
    Error {
        GrpcStatus
            { status: GrpcStatus, query: String }
            |e| { format!("gRPC call `{}` failed with status: {1}", e.query, e.status) },
        GrpcTransport
            [ TraceError<TransportError> ]
            |_| { "error in underlying transport when making gRPC call" },
        Trpc
            { payload_type: String }
            [ TraceError<TrpcError> ]
            |e| { format!("tendermint rpc error: {}", e.payload_type) },
        AbciQuery
            { query: AbciQuery, payload: String }
            |e| { format!("ABCI query returned an error: {:?} => details: {:?}", e.query, e.payload) },
        ProtobufDecode
            { payload_type: String }
            [ TraceError<DecodeError> ]
            |e| { format!("error decoding protocol buffer for {}", e.payload_type) },
        TendermintProtobufDecode
            { payload_type: String }
            [ TraceError<TendermintProtoError> ]
            |e| { format!("Tendermint protobuf decode error: {}", e.payload_type) },
        UtilsProtobufEncode
            { payload_type: String }
            [ TraceError<UtilsEncodeError> ]
            |e| { format!("error encoding protocol buffer for {}", e.payload_type) },
        LoadCosmosChainConfig
            [ TraceError<FileError> ]
            |_| { "Load cosmos chain config error" },
        CosmosParams
            { payload_type: String }
            |e| { format!("query cosmos params error: {}", e.payload_type) },
        EmptyQueryAccount
            { address: String }
            |e| { format!("Query/Account RPC returned an empty account for address: {}", e.address) },
        EmptyBaseAccount
            |_| { "empty BaseAccount within EthAccount" },
        UnknownAccountType
            { type_url: String }
            |e| { format!("failed to deserialize account of an unknown protobuf type: {0}", e.type_url) },

        // keyring
        ReadCosmosKey
            [ TraceError<FileError> ]
            |_| { "read cosmos key error" },
        EncodedPublicKey
            [ TraceError<serde_json::Error> ]
            |_| { "encode public key error" },
        AddressBech32Decode
            { address: String }
            [ TraceError<UtilsEncodeError> ]
            |e| { format!("address {} bech32 decode error", e.address) },
        AddressBech32Encode
            [ TraceError<UtilsEncodeError> ]
            |_| { "address bech32 encode error" },
        InvalidMnemonic
            [ DisplayOnly<anyhow::Error> ]
            |_| { "invalid mnemonic" },
        Bip32KeyGenerationFailed
            { key_type: String }
            [ TraceError<anyhow::Error> ]
            |e| { format!("cannot generate {} private key from BIP-32 seed", e.key_type) },
        HdPath
            { hd_path: String }
            |e| { format!("invalid derivation path: {}", e.hd_path) },
        PublicKeyMismatch
            { cosmos_key_pk: String }
            |e| { format!("mismatch between the public key {:?} in the key file and the public key derived from the mnemonic", e.cosmos_key_pk) },

        // queries
        LatestBlock
            [ TraceError<TrpcError> ]
            |_| { "query latest block error" },
        BlockHeight
            { payload_type: String }
            [ TraceError<TypesError> ]
            |e| { format!("block height error: {}", e.payload_type) },
        ClientState
            { payload_type: String }
            [ TraceError<TypesError> ]
            |e| { format!("client state error: {}", e.payload_type) },
        ExpiredClientState
            { client_id: ClientId }
            |e| { format!("client state has expired: {}", e.client_id) },
        FrozenClientState
            { client_id: ClientId }
            |e| { format!("client state is frozen: {}", e.client_id) },
        ConnectionNotFound
            { connection_id: ConnectionId }
            |e| { format!("connection not found: {0}", e.connection_id) },
        ChannelNotFound
            { port_id: PortId, channel_id: ChannelId }
            |e| { format!("channel not found: {}/{}", e.port_id, e.channel_id) },
        MissingSmallerTrustedHeight
            |_| { "missing trusted state smaller than target height" },
        EmptyResponseProof
            |_| { "empty response proof" },
        BadConnectionState
            |_| { "bad connection state" },

        // light client
        FetchLightBlock
            [ TraceError<LightClientIoError> ]
            |_| { "light client fetch light block error" },
        LightClientVerifyBlock
            [ TraceError<LightClientError> ]
            |_| { "light client verify a block with height error" },

        // tx
        Tx
            [ TraceError<TxError> ]
            |e| { format!("tx error: {}", e) },
        Operation
            [ TraceError<OperationError> ]
            |_| { "fee arithmetic error" },
        TxResponse
            { event: String }
            |e| { format!("tx response event consists of an error: {}", e.event) },
        InsufficientFunds
            { code: u32, log: String }
            |e| { format!("broadcast rejected for fees, code {}: {}", e.code, e.log) },

        // events
        IbcEvent
            { payload: String }
            [ TraceError<TypesError> ]
            |e| { format!("ibc event error: {}", e.payload) },

        // type wrapping
        TypeError
            [ TraceError<TypesError> ]
            |e| { format!("type error: {}", e) },
        IdentifierError
            [ TraceError<IdentifierError> ]
            |e| { format!("identifier error: {}", e) },
        ConnectionError
            [ TraceError<ConnectionError> ]
            |e| { format!("connection error: {}", e) },
        ChannelError
            [ TraceError<ChannelError> ]
            |e| { format!("channel error: {}", e) },
        CommitmentError
            [ TraceError<CommitmentError> ]
            |e| { format!("commitment error: {}", e) },
        ProofError
            [ TraceError<ProofError> ]
            |e| { format!("proof error: {}", e) },
        Signer
            { payload: String }
            [ TraceError<SignerError> ]
            |e| { format!("Signer error: {}", e.payload) },

        // memo
        Memo
            [ TraceError<MemoError> ]
            |e| { format!("memo error: {}", e) },
    }
}

flex_error::define_error! {
    MemoError {
        TooLong
            { length: usize }
            |e| {
                format_args!("`memo` must been no longer than {} characters, found length {}",
                    crate::tx::types::MEMO_MAX_LEN, e.length)
            }
    }
}
