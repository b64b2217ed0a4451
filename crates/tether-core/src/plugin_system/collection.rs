//! # Plugin Collection
//!
//! [`PluginCollection`] is the public face of the plugin system. It owns the
//! ordered list of loaded plugins, drives the [`DependencyResolver`] for
//! load requests and reports failures through a [`DiagnosticSink`].
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::plugin_system::assembler::PluginList;
use crate::plugin_system::diagnostics::{DiagnosticSink, LogSink};
use crate::plugin_system::error::LoadError;
use crate::plugin_system::identifier::ModuleId;
use crate::plugin_system::module::ModuleSource;
use crate::plugin_system::plugin::{LoadedPlugin, PluginKey};
use crate::plugin_system::resolver::DependencyResolver;
use crate::plugin_system::traits::Host;

/// Ordered, name-addressable set of plugins belonging to one host.
pub struct PluginCollection {
    owner: Weak<dyn Host>,
    source: Arc<dyn ModuleSource>,
    sink: Arc<dyn DiagnosticSink>,
    plugins: Arc<RwLock<PluginList>>,
}

impl PluginCollection {
    /// Create an empty collection. Plugins loaded through it receive `owner`.
    pub fn new(owner: Weak<dyn Host>, source: Arc<dyn ModuleSource>) -> Self {
        Self {
            owner,
            source,
            sink: Arc::new(LogSink),
            plugins: Arc::new(RwLock::new(PluginList::new())),
        }
    }

    /// Create an empty collection owned by `host`
    pub fn for_host<H: Host>(host: &Arc<H>, source: Arc<dyn ModuleSource>) -> Self {
        let host: Arc<dyn Host> = host.clone();
        Self::new(Arc::downgrade(&host), source)
    }

    /// Replace the diagnostic sink (defaults to [`LogSink`])
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, PluginList> {
        self.plugins.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PluginList> {
        self.plugins.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load a comma-separated list of plugin names and everything they
    /// depend on.
    ///
    /// `None`, an empty string or only blanks is a no-op. On failure the
    /// first error is returned unchanged and reported once to the sink;
    /// plugins inserted before the failure stay in the collection.
    pub async fn load(&self, names: Option<&str>) -> Result<(), LoadError> {
        let requested = ModuleId::parse_request(names);
        if requested.is_empty() {
            log::debug!("Empty load request, nothing to do");
            return Ok(());
        }

        log::debug!("Loading plugins: {:?}", requested.iter().map(ModuleId::as_str).collect::<Vec<_>>());
        let resolver = DependencyResolver::new(Arc::clone(&self.source), self.owner.clone(), Arc::clone(&self.plugins));
        match resolver.resolve_all(requested).await {
            Ok(_) => {
                log::info!("Plugin collection now holds {} plugin(s)", self.len());
                Ok(())
            }
            Err(error) => {
                self.sink.error(&error.diagnostic());
                Err(error)
            }
        }
    }

    /// Insert an already constructed plugin, bypassing resolution. Returns
    /// `false` when a plugin with the same name is already present.
    pub fn add(&self, plugin: LoadedPlugin) -> bool {
        let name = plugin.name().to_string();
        let added = self.write().insert(plugin);
        if !added {
            log::debug!("Plugin '{}' is already in the collection", name);
        }
        added
    }

    /// Look up a plugin by position or by name
    pub fn get<'a>(&self, key: impl Into<PluginKey<'a>>) -> Option<Arc<LoadedPlugin>> {
        self.read().get(key.into()).cloned()
    }

    /// Plugin at `index`
    pub fn at(&self, index: usize) -> Option<Arc<LoadedPlugin>> {
        self.get(PluginKey::Index(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains(name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Plugin names in collection order
    pub fn names(&self) -> Vec<String> {
        self.read().names()
    }

    /// Snapshot of the entries in collection order
    pub fn plugins(&self) -> Vec<Arc<LoadedPlugin>> {
        self.read().iter().cloned().collect()
    }

    /// The host plugins are created for, if it is still alive
    pub fn owner(&self) -> Option<Arc<dyn Host>> {
        self.owner.upgrade()
    }
}
