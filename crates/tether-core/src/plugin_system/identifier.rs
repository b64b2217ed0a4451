use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::kernel::constants::{PATH_SEPARATOR, PLUGIN_NAMESPACE, REQUEST_SEPARATOR};

/// A dependency identifier, classified once when it is parsed.
///
/// Raw identifiers come in three shapes:
///
/// | raw            | variant                    | fetched as     | collected |
/// |----------------|----------------------------|----------------|-----------|
/// | `plugin!A`     | `Plugin("A")`              | `plugin!A`     | yes       |
/// | `plugin!H/a`   | `Resource("H/a")`          | `plugin!H/a`   | no        |
/// | `c`            | `Module("c")`              | `c`            | no        |
///
/// Only [`ModuleId::Plugin`] is validated against the base capability and
/// inserted into a collection. Resources and plain modules are auxiliary:
/// they are fetched (and their own dependencies resolved) for side effects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleId {
    /// Plugin-shaped: a single segment inside the plugin namespace
    Plugin(String),
    /// Path-qualified module inside the plugin namespace
    Resource(String),
    /// Plain module outside the plugin namespace
    Module(String),
}

/// Error returned when a raw identifier cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Identifier is empty")]
    Empty,

    #[error("Malformed identifier '{raw}': {reason}")]
    Malformed { raw: String, reason: &'static str },
}

impl ModuleId {
    /// Parse a raw dependency string as written in a module definition.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        if raw.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(IdentifierError::Malformed { raw: raw.to_string(), reason: "contains whitespace" });
        }

        match raw.strip_prefix(PLUGIN_NAMESPACE) {
            Some("") => Err(IdentifierError::Malformed { raw: raw.to_string(), reason: "missing plugin name" }),
            Some(path) => {
                check_segments(raw, path)?;
                if path.contains(PATH_SEPARATOR) {
                    Ok(ModuleId::Resource(path.to_string()))
                } else {
                    Ok(ModuleId::Plugin(path.to_string()))
                }
            }
            None => {
                check_segments(raw, raw)?;
                Ok(ModuleId::Module(raw.to_string()))
            }
        }
    }

    /// Classify a name from a load request ("A", "H/a"). Requested names are
    /// always inside the plugin namespace.
    pub fn requested(name: &str) -> Self {
        if name.contains(PATH_SEPARATOR) {
            ModuleId::Resource(name.to_string())
        } else {
            ModuleId::Plugin(name.to_string())
        }
    }

    /// Split a comma-separated load request. Blank entries are skipped, so
    /// `None`, `""` and `" , "` all request nothing.
    pub fn parse_request(names: Option<&str>) -> Vec<ModuleId> {
        names
            .unwrap_or_default()
            .split(REQUEST_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ModuleId::requested)
            .collect()
    }

    /// Key handed to a module source: plugin-namespaced identifiers get the
    /// namespace prefix, plain modules pass through unchanged.
    pub fn key(&self) -> String {
        match self {
            ModuleId::Plugin(name) | ModuleId::Resource(name) => format!("{}{}", PLUGIN_NAMESPACE, name),
            ModuleId::Module(id) => id.clone(),
        }
    }

    /// Identifier without the namespace prefix ("A", "H/a", "c")
    pub fn as_str(&self) -> &str {
        match self {
            ModuleId::Plugin(s) | ModuleId::Resource(s) | ModuleId::Module(s) => s,
        }
    }

    /// Last path segment; this becomes the name of a loaded plugin.
    pub fn name(&self) -> &str {
        let path = self.as_str();
        path.rsplit(PATH_SEPARATOR).next().unwrap_or(path)
    }

    /// Whether this identifier must resolve to a base-capability extension
    pub fn is_plugin(&self) -> bool {
        matches!(self, ModuleId::Plugin(_))
    }

    /// Whether this identifier is loaded for side effects only
    pub fn is_auxiliary(&self) -> bool {
        !self.is_plugin()
    }
}

fn check_segments(raw: &str, path: &str) -> Result<(), IdentifierError> {
    if path.split(PATH_SEPARATOR).any(str::is_empty) {
        return Err(IdentifierError::Malformed { raw: raw.to_string(), reason: "empty path segment" });
    }
    if path.contains(REQUEST_SEPARATOR) {
        return Err(IdentifierError::Malformed { raw: raw.to_string(), reason: "contains a request separator" });
    }
    Ok(())
}

impl FromStr for ModuleId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleId::parse(s)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
