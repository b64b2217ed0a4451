//! # Tether Core Storage Errors
//!
//! Defines [`StorageSystemError`], covering file I/O and configuration
//! (de)serialization failures while reading manifests from disk.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found at path: {0}")]
    FileNotFound(PathBuf),

    #[error("Directory not found at path: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Deserialization from '{format}' failed for '{path}': {source}")]
    DeserializationError {
        format: String,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedConfigFormat(String),
}

impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path: path.into(),
        }
    }
}
