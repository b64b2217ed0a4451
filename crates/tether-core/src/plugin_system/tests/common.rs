// Shared fixtures for the plugin system tests.
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::plugin_system::collection::PluginCollection;
use crate::plugin_system::diagnostics::DiagnosticSink;
use crate::plugin_system::identifier::ModuleId;
use crate::plugin_system::module::{ModuleError, ModuleExport, ResolvedModule};
use crate::plugin_system::source::StaticModuleSource;
use crate::plugin_system::traits::Plugin;

#[derive(Debug, Default)]
pub struct PluginA;
impl Plugin for PluginA {}

#[derive(Debug, Default)]
pub struct PluginB;
impl Plugin for PluginB {}

#[derive(Debug, Default)]
pub struct GenericPlugin;
impl Plugin for GenericPlugin {}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TestError(pub String);

/// Stand-in host object
#[derive(Debug)]
pub struct Editor {
    pub title: &'static str,
}

/// Collects diagnostics instead of logging them
#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub fn plugin(name: &str) -> ModuleId {
    ModuleId::Plugin(name.to_string())
}

pub fn plugin_path(name: &str) -> String {
    format!("/plugins/{}", name)
}

/// Module exporting a `GenericPlugin`
pub fn generic(name: &str) -> ResolvedModule {
    ResolvedModule::new(plugin_path(name), ModuleExport::plugin_default::<GenericPlugin>())
}

/// Module exporting a plain value
pub fn value(name: &str) -> ResolvedModule {
    ResolvedModule::new(plugin_path(name), ModuleExport::value(name.to_string()))
}

fn j_function() -> usize {
    42
}

/// Source with the standard fixture graph:
///
/// ```text
/// A, B            plugins without deps
/// C -> B
/// D -> A, C
/// E <-> F         mutual dependency
/// G               fails with TestError
/// H -> H/a -> H/a/b -> c   (only H is a plugin)
/// I -> J          J is a plain function, not a plugin
/// ```
pub fn fixture_source() -> Arc<StaticModuleSource> {
    let source = StaticModuleSource::new();
    source
        .define("plugin!A", ResolvedModule::new(plugin_path("A"), ModuleExport::plugin_default::<PluginA>()))
        .define("plugin!B", ResolvedModule::new(plugin_path("B"), ModuleExport::plugin_default::<PluginB>()))
        .define("plugin!C", generic("C").with_deps([plugin("B")]))
        .define("plugin!D", generic("D").with_deps([plugin("A"), plugin("C")]))
        .define("plugin!E", generic("E").with_deps([plugin("F")]))
        .define("plugin!F", generic("F").with_deps([plugin("E")]))
        .define_failure("plugin!G", ModuleError::new(TestError("Some error inside a plugin".to_string())))
        .define("plugin!H", generic("H").with_deps([ModuleId::Resource("H/a".to_string())]))
        .define("plugin!H/a", value("H/a").with_deps([ModuleId::Resource("H/a/b".to_string())]))
        .define("plugin!H/a/b", value("H/a/b").with_deps([ModuleId::Module("c".to_string())]))
        .define("c", ResolvedModule::new("/modules/c", ModuleExport::value("c".to_string())))
        .define("plugin!I", generic("I").with_deps([plugin("J")]))
        .define("plugin!J", ResolvedModule::new(plugin_path("J"), ModuleExport::value(j_function as fn() -> usize)));
    Arc::new(source)
}

/// Collection owned by a fresh `Editor`, reporting into a `RecordingSink`
pub fn collection_with(source: Arc<StaticModuleSource>) -> (Arc<Editor>, PluginCollection, Arc<RecordingSink>) {
    let editor = Arc::new(Editor { title: "test editor" });
    let sink = Arc::new(RecordingSink::default());
    let plugins = PluginCollection::for_host(&editor, source).with_sink(sink.clone());
    (editor, plugins, sink)
}
