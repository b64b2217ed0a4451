//! # Tether Core Errors
//!
//! Defines the crate-level [`Error`] that aggregates the typed errors of each
//! subsystem, plus the [`Result`] alias used by APIs that can fail in more
//! than one subsystem (opening a module directory, running the CLI).
//!
//! `PluginCollection::load` returns the narrower
//! [`LoadError`] so callers receive the original failure untouched.
use std::result::Result as StdResult;

use crate::plugin_system::error::LoadError;
use crate::plugin_system::identifier::IdentifierError;
use crate::plugin_system::manifest::ManifestError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Top-level error type for tether
#[derive(Debug, ThisError)]
pub enum Error {
    /// Resolving or validating a plugin graph failed
    #[error("Plugin load error: {0}")]
    Load(#[from] LoadError),

    /// A raw dependency identifier could not be parsed
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// A module manifest was missing or malformed
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
