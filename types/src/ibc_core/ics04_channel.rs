pub mod channel;
pub mod error;
pub mod msgs;
pub mod packet;
pub mod timeout;
