pub mod error;
pub mod toml_file;
pub mod yaml_file;
