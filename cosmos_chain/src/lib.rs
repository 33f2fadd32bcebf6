pub mod account;
pub mod chain;
pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod keyring;
pub mod light_client;
pub mod query {
    pub mod grpc;
    pub mod trpc;
    pub mod types;
}
pub mod tx;
