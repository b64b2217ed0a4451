use std::collections::HashMap;
use std::sync::Arc;

use crate::plugin_system::plugin::{LoadedPlugin, PluginKey};

/// Ordered, name-addressable list of loaded plugins.
///
/// Append-only: an entry whose name is already present is ignored (first
/// write wins). Dependency-first order is established by the resolver,
/// which inserts a node only after its dependencies have settled.
#[derive(Debug, Default)]
pub struct PluginList {
    entries: Vec<Arc<LoadedPlugin>>,
    /// name -> position in `entries`
    index: HashMap<String, usize>,
}

impl PluginList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `plugin` unless its name is taken. Returns whether it was added.
    pub fn insert(&mut self, plugin: LoadedPlugin) -> bool {
        if self.index.contains_key(plugin.name()) {
            return false;
        }
        self.index.insert(plugin.name().to_string(), self.entries.len());
        self.entries.push(Arc::new(plugin));
        true
    }

    pub fn get(&self, key: PluginKey<'_>) -> Option<&Arc<LoadedPlugin>> {
        match key {
            PluginKey::Index(position) => self.entries.get(position),
            PluginKey::Name(name) => self.index.get(name).and_then(|&position| self.entries.get(position)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of `name`, if present
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<LoadedPlugin>> {
        self.entries.iter()
    }

    /// Plugin names in collection order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|plugin| plugin.name().to_string()).collect()
    }
}
