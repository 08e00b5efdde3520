//! Module registry: the fixed table of installable modules.
//!
//! Built once at startup, either from the builtin table or a JSON file in the
//! metadata feed format, then shared read-only behind an `Arc`.

use crate::error::{DynamodError, RegistryError, Result};
use crate::models::{ModuleDescriptor, ModulesMetadata};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Immutable mapping from feature name to module descriptor.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
    index: HashMap<String, usize>,
}

impl ModuleRegistry {
    /// Build a registry, rejecting blank names, duplicate names and
    /// source URLs that are not absolute http(s) URLs.
    pub fn new(modules: Vec<ModuleDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(modules.len());

        for (position, module) in modules.iter().enumerate() {
            if module.name.trim().is_empty() {
                return Err(DynamodError::Registry {
                    message: format!("module at position {} has a blank name", position),
                });
            }
            match url::Url::parse(&module.source_url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => {
                    return Err(DynamodError::Registry {
                        message: format!(
                            "module '{}' has unsupported url scheme '{}'",
                            module.name,
                            url.scheme()
                        ),
                    });
                }
                Err(e) => {
                    return Err(DynamodError::Registry {
                        message: format!(
                            "module '{}' has an invalid url '{}': {}",
                            module.name, module.source_url, e
                        ),
                    });
                }
            }
            if index.insert(module.name.clone(), position).is_some() {
                return Err(DynamodError::Registry {
                    message: format!("duplicate module name '{}'", module.name),
                });
            }
        }

        Ok(Self { modules, index })
    }

    /// The table shipped with the service.
    pub fn builtin() -> Self {
        let modules = vec![ModuleDescriptor::new(
            "extension_pagos_servicios",
            2,
            "https://tconectahost.netlify.app/modules/extension_pagos_servicios-debug.apk",
            425_984,
        )
        .with_description("Módulo dinámico con funcionalidades adicionales")
        .with_min_app_version(1)];

        let index = modules
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.clone(), i))
            .collect();
        Self { modules, index }
    }

    /// Load a registry from a JSON file shaped like the metadata feed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| DynamodError::io_with_path(e, path))?;
        let feed: ModulesMetadata = serde_json::from_str(&contents)?;
        let registry = Self::new(feed.modules)?;
        info!(
            "Loaded {} module(s) from registry file {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Look up a module by feature name.
    pub fn resolve(&self, feature_id: &str) -> std::result::Result<&ModuleDescriptor, RegistryError> {
        match self.index.get(feature_id) {
            Some(&position) => Ok(&self.modules[position]),
            None => {
                debug!("Registry miss for '{}'", feature_id);
                Err(RegistryError::NotFound {
                    feature: feature_id.to_string(),
                })
            }
        }
    }

    /// All registered modules, in load order.
    pub fn list(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
