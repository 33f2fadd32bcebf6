pub mod bech32;
pub mod error;
pub mod protobuf;
