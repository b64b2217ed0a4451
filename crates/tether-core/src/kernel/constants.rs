/// Application name
pub const APP_NAME: &str = "Tether";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Namespace prefix applied to plugin and plugin-resource identifiers
/// before they are handed to a module source.
pub const PLUGIN_NAMESPACE: &str = "plugin!";

/// Separator between path segments of an identifier ("H/a/b")
pub const PATH_SEPARATOR: char = '/';

/// Separator between plugin names in a load request ("A,B,C")
pub const REQUEST_SEPARATOR: char = ',';

/// Diagnostic prefix for failures while fetching a module
pub const LOAD_FAILURE_PREFIX: &str = "collection-load";

/// Diagnostic prefix for plugin-shaped modules that are not plugins
pub const INSTANCE_FAILURE_PREFIX: &str = "collection-instance";

/// Directory (under a module root) holding plugin modules
pub const PLUGINS_DIR: &str = "plugins";

/// Directory (under a module root) holding plain modules
pub const MODULES_DIR: &str = "modules";

/// File stem of a module manifest ("manifest.json", "manifest.toml", ...)
pub const MANIFEST_STEM: &str = "manifest";
