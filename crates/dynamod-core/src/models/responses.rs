//! Response bodies served by the HTTP surface.

use super::ModuleDescriptor;
use crate::config::ServiceConfig;
use serde::{Deserialize, Serialize};

/// Current local time in the service's timestamp format.
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .format(ServiceConfig::TIMESTAMP_FORMAT)
        .to_string()
}

/// Service banner (`GET /`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub endpoints: ServiceEndpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    pub health: String,
    pub modules_metadata: String,
}

impl ServiceInfo {
    pub fn running(timestamp: impl Into<String>) -> Self {
        Self {
            service: ServiceConfig::NAME.to_string(),
            status: "running".to_string(),
            version: ServiceConfig::VERSION.to_string(),
            timestamp: timestamp.into(),
            endpoints: ServiceEndpoints {
                health: "/health".to_string(),
                modules_metadata: "/api/v1/modules/metadata".to_string(),
            },
        }
    }
}

/// Liveness and diagnostics (`GET /health`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub cache_size: usize,
}

impl HealthStatus {
    pub fn up(timestamp: impl Into<String>, cache_size: usize) -> Self {
        Self {
            status: "UP".to_string(),
            service: ServiceConfig::NAME.to_string(),
            version: ServiceConfig::VERSION.to_string(),
            timestamp: timestamp.into(),
            cache_size,
        }
    }
}

/// Client-facing metadata feed (`GET /api/v1/modules/metadata`).
///
/// Also the on-disk format of a registry file, where `version` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesMetadata {
    #[serde(default = "default_feed_version")]
    pub version: u32,
    pub modules: Vec<ModuleDescriptor>,
}

fn default_feed_version() -> u32 {
    ServiceConfig::METADATA_FEED_VERSION
}

impl ModulesMetadata {
    pub fn new(modules: Vec<ModuleDescriptor>) -> Self {
        Self {
            version: default_feed_version(),
            modules,
        }
    }
}

/// Simplified availability list (`GET /api/v1/modules/list`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleAvailability {
    pub available_modules: Vec<AvailableModule>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableModule {
    pub name: String,
    pub status: String,
    pub download_url: String,
}

impl ModuleAvailability {
    pub fn from_descriptors<'a>(modules: impl IntoIterator<Item = &'a ModuleDescriptor>) -> Self {
        let available_modules: Vec<AvailableModule> = modules
            .into_iter()
            .map(|m| AvailableModule {
                name: m.name.clone(),
                status: "available".to_string(),
                download_url: m.source_url.clone(),
            })
            .collect();
        Self {
            total_count: available_modules.len(),
            available_modules,
        }
    }
}

/// Acknowledgement for `POST /upload`. Nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadAck {
    pub status: String,
    pub message: String,
    pub size: usize,
    pub variant: String,
    pub version: String,
}

impl UploadAck {
    pub fn received(size: usize, variant: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: "Bundle received".to_string(),
            size,
            variant: variant.into(),
            version: version.into(),
        }
    }
}

/// Result of `POST /cache/clear`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheClearResult {
    pub status: String,
    pub cleared_entries: usize,
}

impl CacheClearResult {
    pub fn cleared(cleared_entries: usize) -> Self {
        Self {
            status: "success".to_string(),
            cleared_entries,
        }
    }
}

/// Error body shared by all failing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_info_shape() {
        let value = serde_json::to_value(ServiceInfo::running("2026-01-01T00:00:00.000")).unwrap();
        assert_eq!(
            value,
            json!({
                "service": "GloballyDynamic Server",
                "status": "running",
                "version": "1.0.0",
                "timestamp": "2026-01-01T00:00:00.000",
                "endpoints": {
                    "health": "/health",
                    "modules_metadata": "/api/v1/modules/metadata"
                }
            })
        );
    }

    #[test]
    fn test_health_status_shape() {
        let value = serde_json::to_value(HealthStatus::up("t", 3)).unwrap();
        assert_eq!(value["status"], "UP");
        assert_eq!(value["cache_size"], 3);
        assert_eq!(value["service"], ServiceConfig::NAME);
    }

    #[test]
    fn test_availability_from_descriptors() {
        let modules = vec![
            ModuleDescriptor::new("a", 1, "https://host/a.apk", 1),
            ModuleDescriptor::new("b", 1, "https://host/b.apk", 1),
        ];
        let list = ModuleAvailability::from_descriptors(&modules);
        assert_eq!(list.total_count, 2);
        assert_eq!(list.available_modules[1].download_url, "https://host/b.apk");
        assert_eq!(list.available_modules[0].status, "available");
    }

    #[test]
    fn test_metadata_feed_version_defaults() {
        let feed: ModulesMetadata = serde_json::from_value(json!({ "modules": [] })).unwrap();
        assert_eq!(feed.version, 1);
    }

    #[test]
    fn test_timestamp_has_no_offset() {
        let ts = timestamp_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, ServiceConfig::TIMESTAMP_FORMAT).is_ok());
    }
}
