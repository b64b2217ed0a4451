use serde::Serialize;

use tether_core::LoadedPlugin;

/// One line of `tether load` output
#[derive(Debug, Serialize)]
pub struct PluginReport {
    pub position: usize,
    pub name: String,
    pub path: Option<String>,
    pub deps: Vec<String>,
}

impl PluginReport {
    pub fn new(position: usize, plugin: &LoadedPlugin) -> Self {
        Self {
            position,
            name: plugin.name().to_string(),
            path: plugin.path().map(str::to_string),
            deps: plugin.deps().to_vec(),
        }
    }

    pub fn render(&self) -> String {
        let deps = if self.deps.is_empty() { "-".to_string() } else { self.deps.join(", ") };
        format!(
            "{:>3}. {}  (deps: {}; path: {})",
            self.position,
            self.name,
            deps,
            self.path.as_deref().unwrap_or("-")
        )
    }
}
