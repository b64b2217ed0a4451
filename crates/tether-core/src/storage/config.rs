use std::path::Path;

use serde::de::DeserializeOwned;
#[cfg(feature = "yaml-config")]
use serde_yaml;
#[cfg(feature = "toml-config")]
use toml;
use tokio::fs;

use crate::storage::error::StorageSystemError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Every format compiled into this build, in lookup order
    pub const ALL: &'static [ConfigFormat] = &[
        ConfigFormat::Json,
        #[cfg(feature = "toml-config")]
        ConfigFormat::Toml,
        #[cfg(feature = "yaml-config")]
        ConfigFormat::Yaml,
    ];

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Extensions accepted for this format when probing a directory
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ConfigFormat::Json => &["json"],
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => &["yaml", "yml"],
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => &["toml"],
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }

    /// Deserialize `data` in this format. `path` is only used for error context.
    pub fn deserialize<T: DeserializeOwned>(&self, data: &str, path: &Path) -> Result<T, StorageSystemError> {
        let wrap = |source: Box<dyn std::error::Error + Send + Sync>| StorageSystemError::DeserializationError {
            format: self.extension().to_string(),
            path: path.to_path_buf(),
            source,
        };
        match self {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| wrap(Box::new(e))),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(|e| wrap(Box::new(e))),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| wrap(Box::new(e))),
        }
    }
}

/// Read and deserialize a configuration file, choosing the format by extension.
pub async fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, StorageSystemError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| {
        StorageSystemError::UnsupportedConfigFormat(path.display().to_string())
    })?;

    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StorageSystemError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(StorageSystemError::io(e, "read_config", path)),
    };

    format.deserialize(&content, path)
}

/// Find the first `<stem>.<ext>` file in `dir` for any compiled-in format.
pub async fn find_config(dir: &Path, stem: &str) -> Result<Option<std::path::PathBuf>, StorageSystemError> {
    for format in ConfigFormat::ALL {
        for ext in format.extensions() {
            let candidate = dir.join(format!("{}.{}", stem, ext));
            let exists = fs::try_exists(&candidate)
                .await
                .map_err(|e| StorageSystemError::io(e, "probe_config", &candidate))?;
            if exists {
                return Ok(Some(candidate));
            }
        }
    }
    Ok(None)
}
