use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use tether_core::kernel::error::{Error as KernelError, Result as KernelResult};
use tether_core::{DirectoryModuleSource, PluginCollection};

use crate::report::PluginReport;

/// Host object handed to every plugin loaded from the command line
#[derive(Debug)]
pub struct Workspace {
    pub root: PathBuf,
}

/// Load `names` from the module tree at `root` and describe the result in
/// collection order.
pub async fn load(names: &str, root: PathBuf) -> KernelResult<Vec<PluginReport>> {
    let source = Arc::new(DirectoryModuleSource::open(&root).await?);
    let workspace = Arc::new(Workspace { root });
    let plugins = PluginCollection::for_host(&workspace, source);

    info!("Loading '{}' from {}", names, workspace.root.display());
    plugins.load(Some(names)).await?;

    Ok(plugins
        .plugins()
        .iter()
        .enumerate()
        .map(|(index, plugin)| PluginReport::new(index + 1, plugin))
        .collect())
}

/// Print the reports, as text or as a JSON array
pub fn print(reports: &[PluginReport], json: bool) -> KernelResult<()> {
    if json {
        let rendered = serde_json::to_string_pretty(reports)
            .map_err(|e| KernelError::Other(format!("Failed to render JSON: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    if reports.is_empty() {
        println!("No plugins loaded.");
    } else {
        println!("Loaded {} plugin(s):", reports.len());
        for report in reports {
            println!("{}", report.render());
        }
    }
    Ok(())
}
