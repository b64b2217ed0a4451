use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::plugin_system::traits::{Host, Plugin, detached_host};

/// A plugin instance together with the metadata the collection tracks for it
pub struct LoadedPlugin {
    name: String,
    path: Option<String>,
    deps: Vec<String>,
    owner: Weak<dyn Host>,
    instance: Arc<dyn Plugin>,
}

impl LoadedPlugin {
    /// Wrap an already constructed plugin under `name`. Metadata that the
    /// resolver normally fills in (path, deps, owner) starts empty.
    pub fn new(name: impl Into<String>, instance: Arc<dyn Plugin>) -> Self {
        Self {
            name: name.into(),
            path: None,
            deps: Vec::new(),
            owner: detached_host(),
            instance,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_deps(mut self, deps: Vec<String>) -> Self {
        self.deps = deps;
        self
    }

    pub fn with_owner(mut self, owner: Weak<dyn Host>) -> Self {
        self.owner = owner;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location the module was loaded from; `None` for plugins added by hand
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Declared dependency identifiers, in declaration order
    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    /// The owning host, if it is still alive
    pub fn owner(&self) -> Option<Arc<dyn Host>> {
        self.owner.upgrade()
    }

    /// Whether `host` is this plugin's owner
    pub fn is_owned_by<H: Host>(&self, host: &Arc<H>) -> bool {
        self.owner()
            .is_some_and(|owner| std::ptr::addr_eq(Arc::as_ptr(&owner), Arc::as_ptr(host)))
    }

    pub fn instance(&self) -> &Arc<dyn Plugin> {
        &self.instance
    }

    /// Downcast the instance to its concrete plugin type
    pub fn downcast_ref<T: Plugin>(&self) -> Option<&T> {
        let plugin: &dyn Plugin = &*self.instance;
        let any: &dyn Any = plugin;
        any.downcast_ref::<T>()
    }

    /// Whether the instance is a `T`
    pub fn is<T: Plugin>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl fmt::Debug for LoadedPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedPlugin")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("deps", &self.deps)
            .field("instance", &self.instance.label())
            .finish_non_exhaustive()
    }
}

/// Lookup key for a collection entry: a position or a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for PluginKey<'_> {
    fn from(index: usize) -> Self {
        PluginKey::Index(index)
    }
}

impl<'a> From<&'a str> for PluginKey<'a> {
    fn from(name: &'a str) -> Self {
        PluginKey::Name(name)
    }
}

impl<'a> From<&'a String> for PluginKey<'a> {
    fn from(name: &'a String) -> Self {
        PluginKey::Name(name.as_str())
    }
}
