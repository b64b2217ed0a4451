//! Module sources shipped with the crate.
//!
//! [`StaticModuleSource`] is an in-memory registry for embedders that build
//! their modules in code. [`DirectoryModuleSource`] reads module manifests
//! from disk.
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::plugin_system::module::{ModuleError, ModuleSource, ResolvedModule};

pub use crate::plugin_system::loader::DirectoryModuleSource;

#[derive(Clone)]
enum Definition {
    Module(ResolvedModule),
    Failure(ModuleError),
}

#[derive(Clone)]
struct Entry {
    definition: Definition,
    delay: Option<Duration>,
}

/// In-memory [`ModuleSource`] keyed by the namespaced module key
/// (`plugin!A`, `plugin!H/a`, `c`).
///
/// Every fetch is recorded, which makes the source useful for checking
/// how often a module was requested.
#[derive(Default)]
pub struct StaticModuleSource {
    entries: RwLock<HashMap<String, Entry>>,
    fetches: Mutex<Vec<String>>,
}

impl StaticModuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, key: impl Into<String>, definition: Definition) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.into(), Entry { definition, delay: None });
    }

    /// Register `module` under `key`, replacing any previous definition
    pub fn define(&self, key: impl Into<String>, module: ResolvedModule) -> &Self {
        self.insert(key, Definition::Module(module));
        self
    }

    /// Make fetches of `key` fail with `error`
    pub fn define_failure(&self, key: impl Into<String>, error: ModuleError) -> &Self {
        self.insert(key, Definition::Failure(error));
        self
    }

    /// Delay every fetch of `key` by `delay`. Has no effect on undefined keys.
    pub fn with_delay(&self, key: &str, delay: Duration) -> &Self {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get_mut(key) {
            entry.delay = Some(delay);
        }
        self
    }

    /// Number of fetches of `key` so far
    pub fn fetch_count(&self, key: &str) -> usize {
        self.fetched().iter().filter(|fetched| fetched.as_str() == key).count()
    }

    /// Every fetched key, in request order
    pub fn fetched(&self) -> Vec<String> {
        self.fetches.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl ModuleSource for StaticModuleSource {
    async fn fetch(&self, key: &str) -> Result<ResolvedModule, ModuleError> {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(key.to_string());

        let entry = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        let entry = entry.ok_or_else(|| ModuleError::msg(format!("Module '{}' is not defined", key)))?;

        if let Some(delay) = entry.delay {
            tokio::time::sleep(delay).await;
        }

        match entry.definition {
            Definition::Module(module) => Ok(module),
            Definition::Failure(error) => Err(error),
        }
    }
}
