//! Manifest and configuration file access.
pub mod config;
pub mod error;

pub use config::{ConfigFormat, find_config, load_config};
pub use error::StorageSystemError;
