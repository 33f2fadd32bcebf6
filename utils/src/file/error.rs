use flex_error::{define_error, TraceError};
use serde_yaml::Error as YamlError;
use std::io::Error as IOError;
use toml::de::Error as TomlDeError;

define_error! {
    FileError {
        FileReadToString
            [ TraceError<IOError> ]
            |_| { "file read to string error" },
        FileRead
            { file_path: String }
            [ TraceError<IOError> ]
            |e| { format!("file read error: {}", e.file_path) },
        FileWrite
            { file_path: String }
            [ TraceError<IOError> ]
            |e| { format!("file write error: {}", e.file_path) },
        ParseTomlFileFromString
            { file_path: String }
            [ TraceError<TomlDeError> ]
            |e| { format!("failed to deserialize toml file: {}", e.file_path) },
        ParseYamlFileFromString
            { file_path: String }
            [ TraceError<YamlError> ]
            |e| { format!("failed to deserialize yaml file: {}", e.file_path) },
        SerializeYaml
            [ TraceError<YamlError> ]
            |_| { "failed to serialize value to yaml" },
    }
}
