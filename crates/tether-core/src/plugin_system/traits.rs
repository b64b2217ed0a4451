use std::any::Any;
use std::sync::{Arc, Weak};

/// Base capability every plugin extends.
///
/// A module declares that it provides a plugin by exporting
/// [`ModuleExport::Plugin`](crate::plugin_system::module::ModuleExport::Plugin)
/// with a [`PluginFactory`]; anything else resolved under a plugin-shaped
/// identifier is rejected by the validator.
pub trait Plugin: Any + Send + Sync {
    /// Short label for listings; defaults to the implementing type's name.
    fn label(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// The object that owns a plugin collection (an editor, an application...).
///
/// Plugins only ever hold it weakly.
pub trait Host: Any + Send + Sync {}

impl<T: Any + Send + Sync> Host for T {}

/// Constructs plugin instances for a module that exports a plugin.
pub trait PluginFactory: Send + Sync {
    /// Build a new instance owned by `owner`
    fn construct(&self, owner: &Weak<dyn Host>) -> Arc<dyn Plugin>;
}

impl<F> PluginFactory for F
where
    F: Fn(&Weak<dyn Host>) -> Arc<dyn Plugin> + Send + Sync,
{
    fn construct(&self, owner: &Weak<dyn Host>) -> Arc<dyn Plugin> {
        self(owner)
    }
}

/// A weak host reference that never upgrades. Used for plugins added
/// without an owner.
pub fn detached_host() -> Weak<dyn Host> {
    Weak::<()>::new()
}
