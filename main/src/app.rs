use anyhow::{Context, Result};
use relayer::error::Error as RelayerError;
use serde::{Deserialize, Serialize};
use utils::file::yaml_file;

/// The persisted app file. The ics20 bootstrap fills in the connection ids
/// and writes it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub src: String,
    pub dest: String,
    pub mnemonic: String,
    #[serde(default, alias = "srcConnection")]
    pub src_connection: Option<String>,
    #[serde(default, alias = "destConnection")]
    pub dest_connection: Option<String>,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self> {
        let app: AppConfig = yaml_file::yaml_file_read(path)
            .with_context(|| format!("cannot read app file {path}"))?;
        app.validate()?;
        Ok(app)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        yaml_file::yaml_file_write(path, self)
            .with_context(|| format!("cannot write app file {path}"))
    }

    /// Either both connections are recorded or neither is.
    pub fn validate(&self) -> Result<()> {
        if self.src_connection.is_some() != self.dest_connection.is_some() {
            return Err(RelayerError::config(
                "exactly one of src_connection/dest_connection is set; set both or neither"
                    .to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
pub mod app_tests {
    use super::AppConfig;

    fn sample(src_connection: Option<&str>, dest_connection: Option<&str>) -> AppConfig {
        AppConfig {
            src: "local-a".to_string(),
            dest: "local-b".to_string(),
            mnemonic: "test test test".to_string(),
            src_connection: src_connection.map(str::to_string),
            dest_connection: dest_connection.map(str::to_string),
        }
    }

    #[test]
    pub fn validate_works() {
        assert!(sample(None, None).validate().is_ok());
        assert!(sample(Some("connection-0"), Some("connection-1")).validate().is_ok());
        assert!(sample(Some("connection-0"), None).validate().is_err());
        assert!(sample(None, Some("connection-1")).validate().is_err());
    }

    #[test]
    pub fn yaml_roundtrip_works() {
        let dir = std::env::temp_dir().join("app_config_tests");
        std::fs::create_dir_all(&dir).expect("temp dir error!");
        let path = dir.join("app.yaml");
        let path = path.to_str().expect("temp path error!");

        let app = sample(Some("connection-0"), Some("connection-0"));
        app.save(path).expect("save error!");

        let read_back = AppConfig::load(path).expect("load error!");
        assert_eq!(read_back.src_connection, app.src_connection);
        assert_eq!(read_back.mnemonic, app.mnemonic);
    }
}
