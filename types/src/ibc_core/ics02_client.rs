pub mod height;
pub mod msgs;
