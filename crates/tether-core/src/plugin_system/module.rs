//! # Module Resolution Boundary
//!
//! The [`ModuleSource`] trait is the only way the resolver obtains modules.
//! A source maps a key (`plugin!A`, `plugin!H/a`, `c`) to a
//! [`ResolvedModule`]: where it lives, which identifiers it depends on, and
//! what it exports. Sources are asynchronous and may fail; failures are
//! wrapped in a cloneable [`ModuleError`] so every branch of a load that
//! shares the failing node observes the very same error value.
use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use thiserror::Error;

use crate::plugin_system::identifier::ModuleId;
use crate::plugin_system::traits::{Host, Plugin, PluginFactory};

/// Error produced by a module source. Cheap to clone; clones share the
/// original error value.
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct ModuleError(Arc<dyn StdError + Send + Sync>);

#[derive(Debug, Error)]
#[error("{0}")]
struct MessageError(String);

impl ModuleError {
    /// Wrap an arbitrary error without altering it
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ModuleError(Arc::new(error))
    }

    /// Error carrying only a message
    pub fn msg(message: impl Into<String>) -> Self {
        ModuleError::new(MessageError(message.into()))
    }

    /// The original error
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }

    /// Downcast to the original error type
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Whether both values wrap the same error instance
    pub fn ptr_eq(&self, other: &ModuleError) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// What a module provides once it has been loaded.
#[derive(Clone)]
pub enum ModuleExport {
    /// The module extends the base capability and can construct plugins.
    Plugin(Arc<dyn PluginFactory>),
    /// Any other value (helpers, data, functions).
    Value(Arc<dyn Any + Send + Sync>),
}

impl ModuleExport {
    /// Export a plugin built by `factory`
    pub fn plugin<F>(factory: F) -> Self
    where
        F: PluginFactory + 'static,
    {
        ModuleExport::Plugin(Arc::new(factory))
    }

    /// Export a plugin built with `T::default()`
    pub fn plugin_default<T>() -> Self
    where
        T: Plugin + Default,
    {
        ModuleExport::plugin(|_owner: &Weak<dyn Host>| Arc::new(T::default()) as Arc<dyn Plugin>)
    }

    /// Export a plain value
    pub fn value<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        ModuleExport::Value(Arc::new(value))
    }

    pub fn is_plugin(&self) -> bool {
        matches!(self, ModuleExport::Plugin(_))
    }

    /// Downcast a plain value export
    pub fn value_ref<T: Any>(&self) -> Option<&T> {
        match self {
            ModuleExport::Value(value) => value.downcast_ref::<T>(),
            ModuleExport::Plugin(_) => None,
        }
    }
}

impl fmt::Debug for ModuleExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleExport::Plugin(_) => f.write_str("ModuleExport::Plugin(..)"),
            ModuleExport::Value(_) => f.write_str("ModuleExport::Value(..)"),
        }
    }
}

/// A module returned by a [`ModuleSource`]
#[derive(Debug, Clone)]
pub struct ResolvedModule {
    /// Location the module was loaded from
    pub path: String,
    /// Declared dependencies, in declaration order
    pub deps: Vec<ModuleId>,
    /// The module's export
    pub export: ModuleExport,
}

impl ResolvedModule {
    pub fn new(path: impl Into<String>, export: ModuleExport) -> Self {
        Self {
            path: path.into(),
            deps: Vec::new(),
            export,
        }
    }

    /// Replace the declared dependency list
    pub fn with_deps(mut self, deps: impl IntoIterator<Item = ModuleId>) -> Self {
        self.deps = deps.into_iter().collect();
        self
    }
}

/// Asynchronous module resolution service.
///
/// `key` is already namespaced: plugin and resource identifiers arrive as
/// `plugin!<path>`, plain modules arrive unchanged.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    async fn fetch(&self, key: &str) -> Result<ResolvedModule, ModuleError>;
}
