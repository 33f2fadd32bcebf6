use std::{
    fs::{self, File},
    io::Read,
};

use serde::{de::DeserializeOwned, Serialize};

use super::error::FileError;

pub fn yaml_file_read<T>(file_path: &str) -> Result<T, FileError>
where
    T: DeserializeOwned,
{
    let mut file =
        File::open(file_path).map_err(|e| FileError::file_read(file_path.to_string(), e))?;
    let mut str_val = String::new();

    file.read_to_string(&mut str_val)
        .map_err(|e| FileError::file_read_to_string(e))?;

    let result: T = serde_yaml::from_str(&str_val)
        .map_err(|e| FileError::parse_yaml_file_from_string(file_path.to_string(), e))?;

    Ok(result)
}

// serde_yaml emits long scalars on a single line, so identifiers are never folded.
pub fn yaml_file_write<T>(file_path: &str, value: &T) -> Result<(), FileError>
where
    T: Serialize,
{
    let str_val = serde_yaml::to_string(value).map_err(|e| FileError::serialize_yaml(e))?;

    fs::write(file_path, str_val).map_err(|e| FileError::file_write(file_path.to_string(), e))
}

#[cfg(test)]
pub mod yaml_file_tests {
    use serde::{Deserialize, Serialize};

    use super::{yaml_file_read, yaml_file_write};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Sample {
        pub src: String,
        pub dest: String,
        pub src_connection: Option<String>,
    }

    #[test]
    pub fn yaml_write_read_roundtrip_works() {
        let dir = std::env::temp_dir().join("yaml_file_tests");
        std::fs::create_dir_all(&dir).expect("temp dir error!");
        let path = dir.join("app.yaml");
        let path = path.to_str().expect("temp path error!");

        let sample = Sample {
            src: "local-a".to_string(),
            dest: "local-b".to_string(),
            src_connection: Some("connection-0".to_string()),
        };

        yaml_file_write(path, &sample).expect("yaml write error!");
        let read_back: Sample = yaml_file_read(path).expect("yaml read error!");

        assert_eq!(sample, read_back);
    }
}
