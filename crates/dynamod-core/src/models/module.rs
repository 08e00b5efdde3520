//! Module descriptor, one record per installable dynamic module.

use serde::{Deserialize, Serialize};

/// One installable dynamic module as published in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Feature name, unique. Registry and cache key.
    pub name: String,
    /// Publisher-assigned version. Not validated.
    pub version: u32,
    /// Absolute URL of the artifact on the upstream host.
    #[serde(rename = "url")]
    pub source_url: String,
    /// Declared size. Informational only.
    #[serde(rename = "size")]
    pub size_bytes: u64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "minAppVersion", default = "default_min_app_version")]
    pub min_app_version: u32,
}

fn default_min_app_version() -> u32 {
    1
}

impl ModuleDescriptor {
    pub fn new(
        name: impl Into<String>,
        version: u32,
        source_url: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            source_url: source_url.into(),
            size_bytes,
            description: String::new(),
            min_app_version: default_min_app_version(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_min_app_version(mut self, min_app_version: u32) -> Self {
        self.min_app_version = min_app_version;
        self
    }
}
