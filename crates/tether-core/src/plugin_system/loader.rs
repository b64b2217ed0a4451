use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::kernel::constants::{MODULES_DIR, PATH_SEPARATOR, PLUGINS_DIR, PLUGIN_NAMESPACE};
use crate::kernel::error::Result as KernelResult;
use crate::plugin_system::manifest::{ManifestError, ModuleManifest};
use crate::plugin_system::module::{ModuleError, ModuleSource, ResolvedModule};
use crate::storage::error::StorageSystemError;

/// [`ModuleSource`] backed by a directory tree of manifests.
///
/// ```text
/// <root>/plugins/A/manifest.toml      plugin!A
/// <root>/plugins/H/a/manifest.json    plugin!H/a
/// <root>/modules/c/manifest.yaml      c
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryModuleSource {
    root: PathBuf,
}

impl DirectoryModuleSource {
    /// Open `root`, which must be an existing directory
    pub async fn open(root: impl Into<PathBuf>) -> KernelResult<Self> {
        let root = root.into();
        let metadata = fs::metadata(&root).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageSystemError::DirectoryNotFound(root.clone()),
            _ => StorageSystemError::io(e, "open_module_root", &root),
        })?;
        if !metadata.is_dir() {
            return Err(StorageSystemError::DirectoryNotFound(root).into());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the module for `key`
    pub fn module_dir(&self, key: &str) -> Result<PathBuf, ManifestError> {
        let (base, relative) = match key.strip_prefix(PLUGIN_NAMESPACE) {
            Some(path) => (PLUGINS_DIR, path),
            None => (MODULES_DIR, key),
        };

        let mut dir = self.root.join(base);
        for segment in relative.split(PATH_SEPARATOR) {
            if matches!(segment, "" | "." | "..") {
                return Err(ManifestError::InvalidKey { key: key.to_string() });
            }
            dir.push(segment);
        }
        Ok(dir)
    }

    /// Read and convert the manifest for `key`
    pub async fn read_module(&self, key: &str) -> Result<ResolvedModule, ManifestError> {
        let dir = self.module_dir(key)?;
        let manifest = ModuleManifest::load(&dir).await?;
        let name = key.rsplit(PATH_SEPARATOR).next().unwrap_or(key);
        let name = name.strip_prefix(PLUGIN_NAMESPACE).unwrap_or(name);
        manifest.into_module(name, &dir)
    }
}

#[async_trait]
impl ModuleSource for DirectoryModuleSource {
    async fn fetch(&self, key: &str) -> Result<ResolvedModule, ModuleError> {
        log::debug!("Resolving '{}' under {}", key, self.root.display());
        self.read_module(key).await.map_err(ModuleError::new)
    }
}
