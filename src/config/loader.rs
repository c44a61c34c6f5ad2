//! Config document loading and serialization operations.
//!
//! The on-disk format is YAML, consumed through serde_yaml. The loader is the
//! boundary to the file system: a document that cannot be read or parsed is a
//! fatal config error, never silently defaulted.

use super::value::ConfigTree;
use crate::error::{KilnError, Result};
use std::path::Path;
use tracing::debug;

impl ConfigTree {
    /// Load a config document from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML document
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigTree)` - Successfully loaded document
    /// * `Err(KilnError::ConfigError)` - Read or parse failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            KilnError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let tree = Self::from_yaml(&content)?;
        debug!(path = %path.display(), keys = tree.len(), "loaded config document");
        Ok(tree)
    }

    /// Parse a config tree from a YAML string.
    ///
    /// An empty document is an empty tree. A document whose top level is not
    /// a mapping is rejected.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(ConfigTree::new());
        }

        serde_yaml::from_str(yaml)
            .map_err(|e| KilnError::ConfigError(format!("failed to parse config YAML: {}", e)))
    }

    /// Serialize the tree to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| KilnError::ConfigError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Serialize the tree to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| KilnError::ConfigError(format!("failed to serialize config to JSON: {}", e)))
    }
}
