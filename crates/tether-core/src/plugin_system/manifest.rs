use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use serde::Deserialize;
use thiserror::Error;

use crate::kernel::constants::MANIFEST_STEM;
use crate::plugin_system::identifier::{IdentifierError, ModuleId};
use crate::plugin_system::module::{ModuleExport, ResolvedModule};
use crate::plugin_system::traits::{Host, Plugin};
use crate::storage::config::{find_config, load_config};
use crate::storage::error::StorageSystemError;

/// Errors raised while reading a module manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("No manifest found in '{}'", .dir.display())]
    NotFound { dir: PathBuf },

    #[error("Module key '{key}' does not map to a module directory")]
    InvalidKey { key: String },

    #[error(transparent)]
    Storage(#[from] StorageSystemError),

    #[error("Invalid dependency '{dep}' declared in '{}': {source}", .path.display())]
    InvalidDependency {
        path: PathBuf,
        dep: String,
        #[source]
        source: IdentifierError,
    },

    /// The manifest declares that the module fails while initializing
    #[error("Module in '{}' failed to initialize: {message}", .path.display())]
    Initialization { path: PathBuf, message: String },
}

/// What a module directory provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Provides a plugin
    Plugin,
    /// Provides a plain value (its `config` table)
    #[default]
    Module,
}

/// On-disk definition of one module (`manifest.json`, `manifest.toml`,
/// `manifest.yaml`).
///
/// ```toml
/// kind = "plugin"
/// deps = ["plugin!A", "plugin!H/a", "c"]
/// description = "Depends on A"
///
/// [config]
/// greeting = "hello"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModuleManifest {
    #[serde(default)]
    pub kind: ModuleKind,

    /// Raw dependency identifiers, in declaration order
    #[serde(default)]
    pub deps: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Free-form settings handed to the plugin, or exported by a plain module
    #[serde(default)]
    pub config: serde_json::Value,

    /// When set, fetching the module fails with this message
    #[serde(default)]
    pub error: Option<String>,
}

impl ModuleManifest {
    /// Read the manifest stored in `dir`
    pub async fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = find_config(dir, MANIFEST_STEM)
            .await?
            .ok_or_else(|| ManifestError::NotFound { dir: dir.to_path_buf() })?;
        log::debug!("Reading manifest {}", path.display());
        Ok(load_config(&path).await?)
    }

    /// Parse the declared dependencies. `dir` is only used for error context.
    pub fn dependency_ids(&self, dir: &Path) -> Result<Vec<ModuleId>, ManifestError> {
        self.deps
            .iter()
            .map(|dep| {
                ModuleId::parse(dep).map_err(|source| ManifestError::InvalidDependency {
                    path: dir.to_path_buf(),
                    dep: dep.clone(),
                    source,
                })
            })
            .collect()
    }

    /// Turn the manifest read from `dir` into a resolved module named `name`.
    pub fn into_module(self, name: &str, dir: &Path) -> Result<ResolvedModule, ManifestError> {
        if let Some(message) = self.error {
            return Err(ManifestError::Initialization { path: dir.to_path_buf(), message });
        }
        let deps = self.dependency_ids(dir)?;

        let export = match self.kind {
            ModuleKind::Plugin => {
                let name = name.to_string();
                let description = self.description;
                let config = self.config;
                ModuleExport::plugin(move |owner: &Weak<dyn Host>| {
                    Arc::new(ManifestPlugin {
                        name: name.clone(),
                        description: description.clone(),
                        config: config.clone(),
                        owner: owner.clone(),
                    }) as Arc<dyn Plugin>
                })
            }
            ModuleKind::Module => ModuleExport::value(self.config),
        };

        Ok(ResolvedModule::new(dir.display().to_string(), export).with_deps(deps))
    }
}

/// Plugin instance built from a manifest of kind `plugin`
pub struct ManifestPlugin {
    name: String,
    description: Option<String>,
    config: serde_json::Value,
    owner: Weak<dyn Host>,
}

impl ManifestPlugin {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn config(&self) -> &serde_json::Value {
        &self.config
    }

    pub fn owner(&self) -> Option<Arc<dyn Host>> {
        self.owner.upgrade()
    }
}

impl Plugin for ManifestPlugin {
    fn label(&self) -> &'static str {
        "manifest"
    }
}
