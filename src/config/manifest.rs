//! Component manifests.
//!
//! A manifest lists components and their declared markers without any code
//! behind them, so a deployment can be checked for what would start eagerly.
//!
//! ```toml
//! [[component]]
//! name = "name-loader"
//! type_name = "demo::NameLoader"
//! markers = ["StartUp", "ApplicationScoped"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::component::ComponentDescriptor;
use crate::config::loader::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ComponentManifest {
    #[serde(default, rename = "component")]
    pub components: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestEntry {
    pub name: String,

    #[serde(default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub markers: Vec<String>,
}

impl ComponentManifest {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Descriptors in manifest order.
    pub fn descriptors(&self) -> Vec<ComponentDescriptor> {
        self.components.iter().map(ManifestEntry::to_descriptor).collect()
    }
}

impl ManifestEntry {
    pub fn to_descriptor(&self) -> ComponentDescriptor {
        let desc = ComponentDescriptor::new(self.name.as_str())
            .with_markers(self.markers.iter().cloned());
        match &self.type_name {
            Some(type_name) => desc.with_type_name(type_name.as_str()),
            None => desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let manifest = ComponentManifest::parse(
            r#"
            [[component]]
            name = "loader"
            type_name = "demo::NameLoader"
            markers = ["StartUp", "ApplicationScoped"]

            [[component]]
            name = "catalog"
            markers = ["ApplicationScoped"]

            [[component]]
            name = "plain"
            "#,
        )
        .unwrap();

        let descriptors = manifest.descriptors();
        assert_eq!(descriptors.len(), 3);
        assert_eq!(descriptors[0].id().as_str(), "loader");
        assert_eq!(descriptors[0].type_name(), Some("demo::NameLoader"));
        assert!(descriptors[0].has_marker("StartUp"));
        assert!(descriptors[1].has_marker("ApplicationScoped"));
        assert!(!descriptors[1].has_marker("StartUp"));
        assert_eq!(descriptors[2].markers().count(), 0);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = ComponentManifest::parse("").unwrap();
        assert!(manifest.descriptors().is_empty());
    }
}
