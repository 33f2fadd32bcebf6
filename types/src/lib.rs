pub mod error;
pub mod ibc_core;
pub mod ibc_events;
pub mod light_clients;
pub mod message;
pub mod proofs;
pub mod signer;
pub mod timestamp;
