//! Centralized configuration for the dynamod service.
//!
//! Constants for service identity, upstream network behaviour and HTTP limits.

use std::time::Duration;

/// Service identity reported by the banner and health endpoints.
pub struct ServiceConfig;

impl ServiceConfig {
    pub const NAME: &'static str = "GloballyDynamic Server";
    pub const VERSION: &'static str = "1.0.0";
    /// Version of the metadata feed document itself, not of any module.
    pub const METADATA_FEED_VERSION: u32 = 1;
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.3f";
}

/// Upstream (artifact host) network configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const READ_TIMEOUT: Duration = Duration::from_secs(60);
    pub const USER_AGENT: &'static str = concat!("dynamod/", env!("CARGO_PKG_VERSION"));
}

/// HTTP surface configuration.
pub struct HttpConfig;

impl HttpConfig {
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;
    pub const APK_CONTENT_TYPE: &'static str = "application/vnd.android.package-archive";
    pub const APK_EXTENSION: &'static str = "apk";
}

/// Upstream fetch timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Bound on establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// Bound on each read of the response body.
    pub read_timeout: Duration,
}

impl FetchConfig {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: NetworkConfig::CONNECT_TIMEOUT,
            read_timeout: NetworkConfig::READ_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.read_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_fetch_config_builders() {
        let config = FetchConfig::default()
            .with_connect_timeout(Duration::from_secs(1))
            .with_read_timeout(Duration::from_millis(250));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.read_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_user_agent_carries_version() {
        assert!(NetworkConfig::USER_AGENT.starts_with("dynamod/"));
    }
}
