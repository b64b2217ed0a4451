//! # Tether Plugin System
//!
//! Loads plugins and everything they depend on into an ordered collection in
//! which every plugin comes after the plugins it depends on.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`identifier`]**: Parses raw dependency strings into [`ModuleId`]
//!   (plugin, plugin resource or plain module).
//! - **[`module`]**: The [`ModuleSource`] boundary through which modules are
//!   fetched, and the [`ResolvedModule`] / [`ModuleExport`] it returns.
//! - **[`resolver`]**: The [`DependencyResolver`], which fetches every node
//!   once, resolves dependencies first and breaks cycles.
//! - **[`validator`]**: Classifies fetched modules and builds collection
//!   entries for valid plugins.
//! - **[`assembler`]**: [`PluginList`], the append-only, name-indexed list.
//! - **[`collection`]**: [`PluginCollection`], the public entry point
//!   (`load`, `add`, `get`, `len`).
//! - **[`source`]** and **[`loader`]**: In-memory and directory-backed module
//!   sources.
//! - **[`manifest`]**: The on-disk module definition ([`ModuleManifest`]).
//! - **[`error`]**: [`LoadError`], the error a load ends with.
//! - **[`traits`]**: The [`Plugin`] base capability, [`Host`] and
//!   [`PluginFactory`].
pub mod assembler;
pub mod collection;
pub mod diagnostics;
pub mod error;
pub mod identifier;
pub mod loader;
pub mod manifest;
pub mod module;
pub mod plugin;
pub mod resolver;
pub mod source;
pub mod traits;
pub mod validator;

pub use assembler::PluginList;
pub use collection::PluginCollection;
pub use diagnostics::{DiagnosticSink, LogSink};
pub use error::LoadError;
pub use identifier::{IdentifierError, ModuleId};
pub use manifest::{ManifestError, ManifestPlugin, ModuleKind, ModuleManifest};
pub use module::{ModuleError, ModuleExport, ModuleSource, ResolvedModule};
pub use plugin::{LoadedPlugin, PluginKey};
pub use resolver::DependencyResolver;
pub use source::{DirectoryModuleSource, StaticModuleSource};
pub use traits::{Host, Plugin, PluginFactory};

// Test module declaration
#[cfg(test)]
mod tests;
