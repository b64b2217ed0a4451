use std::error::Error as StdError;
use std::path::PathBuf;

use crate::kernel::error::{Error, Result};
use crate::plugin_system::error::LoadError;
use crate::plugin_system::identifier::{IdentifierError, ModuleId};
use crate::plugin_system::module::ModuleError;
use crate::storage::error::StorageSystemError;

fn failing_open() -> Result<()> {
    Err(StorageSystemError::DirectoryNotFound(PathBuf::from("/missing")))?
}

#[test]
fn test_subsystem_errors_convert() {
    let err = failing_open().unwrap_err();
    assert!(matches!(err, Error::StorageSystem(StorageSystemError::DirectoryNotFound(_))));
    assert_eq!(err.to_string(), "Storage system error: Directory not found at path: /missing");

    let err: Error = IdentifierError::Empty.into();
    assert_eq!(err.to_string(), "Identifier error: Identifier is empty");
}

#[test]
fn test_load_error_keeps_its_source() {
    let load = LoadError::Fetch {
        id: ModuleId::Plugin("A".to_string()),
        source: ModuleError::msg("unreachable host"),
    };
    assert_eq!(load.to_string(), "Failed to load module 'plugin!A': unreachable host");
    assert_eq!(load.diagnostic(), "collection-load: Failed to load module 'plugin!A': unreachable host");

    let err = Error::from(load);
    let source = err.source().expect("load errors have a source");
    assert!(source.to_string().starts_with("Failed to load module"));
}

#[test]
fn test_invalid_plugin_diagnostic() {
    let load = LoadError::InvalidPlugin { id: ModuleId::Plugin("J".to_string()) };
    assert_eq!(load.stage_prefix(), "collection-instance");
    assert_eq!(load.diagnostic(), "collection-instance: Module is not a valid plugin: 'J'");
    assert!(load.module_error().is_none());
}

#[test]
fn test_message_errors() {
    let err: Error = "plain".into();
    assert!(matches!(err, Error::Other(ref message) if message == "plain"));
    let err: Error = String::from("owned").into();
    assert_eq!(err.to_string(), "Error: owned");
}
