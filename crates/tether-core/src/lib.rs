pub mod kernel;
pub mod plugin_system;
pub mod storage;

// Re-export key public types/traits for easier use by the binary and embedders
pub use kernel::error::Error as KernelError;
pub use plugin_system::{
    DirectoryModuleSource, LoadError, LoadedPlugin, ModuleExport, ModuleId, ModuleSource, Plugin, PluginCollection,
    ResolvedModule, StaticModuleSource,
};
