//! # Tether Plugin System Errors
//!
//! [`LoadError`] is the only error a load can end with. It is `Clone`
//! because a node shared by several branches hands the same failure to all
//! of them; the adapter's original error travels inside [`ModuleError`]
//! and is never rewrapped.
use crate::kernel::constants::{INSTANCE_FAILURE_PREFIX, LOAD_FAILURE_PREFIX};
use crate::plugin_system::identifier::ModuleId;
use crate::plugin_system::module::ModuleError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// The module source could not provide the module (unknown name, I/O,
    /// malformed manifest, failure inside the module's own initialization).
    #[error("Failed to load module '{key}': {source}", key = .id.key())]
    Fetch {
        id: ModuleId,
        #[source]
        source: ModuleError,
    },

    /// A plugin-shaped identifier resolved to something that is not a plugin.
    #[error("{prefix}: Module is not a valid plugin: '{id}'", prefix = INSTANCE_FAILURE_PREFIX)]
    InvalidPlugin { id: ModuleId },
}

impl LoadError {
    /// Identifier of the node that failed
    pub fn id(&self) -> &ModuleId {
        match self {
            LoadError::Fetch { id, .. } | LoadError::InvalidPlugin { id } => id,
        }
    }

    /// The module source's original error, for fetch failures
    pub fn module_error(&self) -> Option<&ModuleError> {
        match self {
            LoadError::Fetch { source, .. } => Some(source),
            LoadError::InvalidPlugin { .. } => None,
        }
    }

    /// Stable prefix naming the stage that failed
    pub fn stage_prefix(&self) -> &'static str {
        match self {
            LoadError::Fetch { .. } => LOAD_FAILURE_PREFIX,
            LoadError::InvalidPlugin { .. } => INSTANCE_FAILURE_PREFIX,
        }
    }

    /// The single diagnostic line reported for a failed load. Always starts
    /// with [`stage_prefix`](Self::stage_prefix).
    pub fn diagnostic(&self) -> String {
        match self {
            LoadError::Fetch { .. } => format!("{}: {}", LOAD_FAILURE_PREFIX, self),
            LoadError::InvalidPlugin { .. } => self.to_string(),
        }
    }
}
