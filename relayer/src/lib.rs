pub mod client;
pub mod endpoint;
pub mod error;
pub mod link;
pub mod relayed_heights;
pub mod side;
