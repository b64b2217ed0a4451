//! Structural validation of resolved modules.
//!
//! Classification happens as soon as a module has been fetched and before
//! any of its dependencies are visited. Construction of the plugin instance
//! is a separate step ([`instantiate`]) that only runs for valid modules,
//! once their dependencies are in place.
use std::sync::{Arc, Weak};

use crate::plugin_system::error::LoadError;
use crate::plugin_system::identifier::ModuleId;
use crate::plugin_system::module::{ModuleExport, ResolvedModule};
use crate::plugin_system::plugin::LoadedPlugin;
use crate::plugin_system::traits::{Host, PluginFactory};

/// Outcome of validating one resolved module
#[derive(Clone)]
pub enum Classification {
    /// Plugin-shaped identifier with a plugin export
    Valid(Arc<dyn PluginFactory>),
    /// Plugin-shaped identifier whose export is not a plugin
    InvalidShape,
    /// Resource or plain module; never checked, never collected
    Auxiliary,
}

impl Classification {
    /// Turn `InvalidShape` into the load error for `id`
    pub fn check(self, id: &ModuleId) -> Result<Self, LoadError> {
        match self {
            Classification::InvalidShape => Err(LoadError::InvalidPlugin { id: id.clone() }),
            other => Ok(other),
        }
    }
}

pub fn classify(id: &ModuleId, module: &ResolvedModule) -> Classification {
    if id.is_auxiliary() {
        return Classification::Auxiliary;
    }
    match &module.export {
        ModuleExport::Plugin(factory) => Classification::Valid(Arc::clone(factory)),
        ModuleExport::Value(_) => Classification::InvalidShape,
    }
}

/// Build the collection entry for a validated module
pub fn instantiate(
    id: &ModuleId,
    module: &ResolvedModule,
    factory: &dyn PluginFactory,
    owner: &Weak<dyn Host>,
) -> LoadedPlugin {
    LoadedPlugin::new(id.name(), factory.construct(owner))
        .with_path(module.path.clone())
        .with_deps(module.deps.iter().map(ToString::to_string).collect())
        .with_owner(owner.clone())
}
