//! Error types for dynamod.
//!
//! `DynamodError` covers startup and configuration failures. Request-path
//! failures use the narrower `RegistryError`, `FetchError` and
//! `ResolutionError` so the HTTP layer can map each kind to a status code.

use std::path::PathBuf;
use thiserror::Error;

/// Startup and configuration errors.
#[derive(Debug, Error)]
pub enum DynamodError {
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Invalid registry: {message}")]
    Registry { message: String },

    #[error("Network error: {message}")]
    Network { message: String },
}

/// Result type alias for dynamod startup operations.
pub type Result<T> = std::result::Result<T, DynamodError>;

impl From<std::io::Error> for DynamodError {
    fn from(err: std::io::Error) -> Self {
        DynamodError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for DynamodError {
    fn from(err: serde_json::Error) -> Self {
        DynamodError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl DynamodError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        DynamodError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }
}

/// Registry lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Module not found: {feature}")]
    NotFound { feature: String },
}

/// Upstream fetch failure. Each variant is a distinct diagnostic kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Connection to {url} timed out")]
    ConnectTimeout { url: String },

    #[error("Reading from {url} timed out")]
    ReadTimeout { url: String },

    #[error("Upstream {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },
}

impl FetchError {
    /// Short, stable name of the failure kind for logs and error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl { .. } => "invalid_url",
            FetchError::ConnectTimeout { .. } => "connect_timeout",
            FetchError::ReadTimeout { .. } => "read_timeout",
            FetchError::Status { .. } => "http_status",
            FetchError::Transport { .. } => "transport",
        }
    }

    /// The URL the failed fetch targeted.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::ConnectTimeout { url }
            | FetchError::ReadTimeout { url }
            | FetchError::Status { url, .. }
            | FetchError::Transport { url, .. } => url,
        }
    }

    /// Whether the failure was one of the two timeout kinds.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            FetchError::ConnectTimeout { .. } | FetchError::ReadTimeout { .. }
        )
    }
}

/// Failure of the feature id → artifact bytes resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Unknown module: {feature}")]
    UnknownModule { feature: String },

    #[error("Upstream unavailable for {feature}: {source}")]
    UpstreamUnavailable {
        feature: String,
        #[source]
        source: FetchError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResolutionError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ResolutionError::InvalidRequest { .. } => "invalid_request",
            ResolutionError::UnknownModule { .. } => "unknown_module",
            ResolutionError::UpstreamUnavailable { .. } => "upstream_unavailable",
            ResolutionError::Internal(_) => "internal_error",
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ResolutionError::InvalidRequest {
            message: message.into(),
        }
    }
}

impl From<RegistryError> for ResolutionError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { feature } => ResolutionError::UnknownModule { feature },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistryError::NotFound {
            feature: "maps".into(),
        };
        assert_eq!(err.to_string(), "Module not found: maps");

        let err = FetchError::Status {
            url: "https://host/a.apk".into(),
            status: 503,
        };
        assert_eq!(err.to_string(), "Upstream https://host/a.apk returned HTTP 503");
    }

    #[test]
    fn test_registry_error_converts_to_unknown_module() {
        let err: ResolutionError = RegistryError::NotFound {
            feature: "maps".into(),
        }
        .into();
        assert_eq!(
            err,
            ResolutionError::UnknownModule {
                feature: "maps".into()
            }
        );
        assert_eq!(err.code(), "unknown_module");
    }

    #[test]
    fn test_fetch_error_kinds() {
        let url = "https://host/a.apk".to_string();
        assert_eq!(
            FetchError::ConnectTimeout { url: url.clone() }.kind(),
            "connect_timeout"
        );
        assert!(FetchError::ReadTimeout { url: url.clone() }.is_timeout());
        assert!(!FetchError::Status {
            url: url.clone(),
            status: 404
        }
        .is_timeout());
        assert_eq!(
            FetchError::Transport {
                url: url.clone(),
                message: "reset".into()
            }
            .url(),
            url
        );
    }

    #[test]
    fn test_upstream_unavailable_keeps_source() {
        use std::error::Error as _;

        let err = ResolutionError::UpstreamUnavailable {
            feature: "maps".into(),
            source: FetchError::ReadTimeout {
                url: "https://host/maps.apk".into(),
            },
        };
        assert_eq!(err.code(), "upstream_unavailable");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_with_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = DynamodError::io_with_path(io, "/tmp/registry.json");
        assert!(err.to_string().contains("registry.json"));
    }
}
