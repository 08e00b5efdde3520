//! Artifact fetcher.
//!
//! One GET per call, no retries, whole body buffered in memory. Failures are
//! classified into `FetchError` kinds so callers can tell a slow upstream from
//! a missing file.

use crate::config::{FetchConfig, NetworkConfig};
use crate::error::{DynamodError, FetchError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use std::error::Error as StdError;
use std::time::Instant;
use tracing::{debug, info};

/// Retrieves raw artifact bytes from a URL.
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<Bytes, FetchError>;
}

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default 30s connect / 60s read timeouts.
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| DynamodError::Network {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    fn classify(url: &str, err: reqwest::Error) -> FetchError {
        let url = url.to_string();
        if is_timeout(&err) {
            if err.is_connect() {
                FetchError::ConnectTimeout { url }
            } else {
                FetchError::ReadTimeout { url }
            }
        } else if err.is_builder() {
            FetchError::InvalidUrl {
                url,
                reason: err.to_string(),
            }
        } else {
            FetchError::Transport {
                url,
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl ArtifactFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<Bytes, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let started = Instant::now();
        debug!("GET {}", url);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| Self::classify(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::classify(url, e))?;

        info!(
            "Fetched {} bytes from {} in {:?}",
            body.len(),
            extract_domain(url),
            started.elapsed()
        );
        Ok(body)
    }
}

/// reqwest reports some read timeouts only through the source chain.
fn is_timeout(err: &reqwest::Error) -> bool {
    if err.is_timeout() {
        return true;
    }
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

/// Extract domain from a URL.
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/modules/maps.apk"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04apk".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher
            .fetch(&format!("{}/modules/maps.apk", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, Bytes::from_static(b"PK\x03\x04apk"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.apk"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher
            .fetch(&format!("{}/missing.apk", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.kind(), "http_status");
    }

    #[tokio::test]
    async fn test_fetch_server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_read_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"late".to_vec())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::with_config(
            FetchConfig::default().with_read_timeout(Duration::from_millis(200)),
        )
        .unwrap();
        let err = fetcher
            .fetch(&format!("{}/slow.apk", server.uri()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, FetchError::ReadTimeout { .. }),
            "expected read timeout, got {:?}",
            err
        );
        assert_eq!(err.kind(), "read_timeout");
    }

    #[tokio::test]
    async fn test_fetch_connect_timeout() {
        // A listener that never accepts, with its backlog filled by one held
        // connection, leaves further SYNs unanswered.
        let socket = tokio::net::TcpSocket::new_v4().unwrap();
        socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let listener = socket.listen(0).unwrap();
        let addr = listener.local_addr().unwrap();
        let _held = tokio::net::TcpStream::connect(addr).await.unwrap();

        let fetcher = HttpFetcher::with_config(
            FetchConfig::default().with_connect_timeout(Duration::from_millis(300)),
        )
        .unwrap();
        let err = fetcher
            .fetch(&format!("http://{}/a.apk", addr))
            .await
            .unwrap_err();
        assert!(
            matches!(err, FetchError::ConnectTimeout { .. }),
            "expected connect timeout, got {:?}",
            err
        );
        assert_eq!(err.kind(), "connect_timeout");
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher
            .fetch(&format!("http://127.0.0.1:{}/a.apk", port))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_malformed_url() {
        let fetcher = HttpFetcher::new().unwrap();

        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));

        let err = fetcher.fetch("ftp://host/a.apk").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://tconectahost.netlify.app/modules/a.apk"),
            "tconectahost.netlify.app"
        );
        assert_eq!(extract_domain("invalid-url"), "unknown");
    }
}
