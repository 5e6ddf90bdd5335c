//! Archive download from the generation service

use async_trait::async_trait;

use super::{FetchError, GenerationRequest, ProjectSpec};
use crate::config::ServiceConfig;

/// Raw archive returned by the generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArchive {
    pub bytes: Vec<u8>,
    /// Folder name (not a full path) the archive should be unpacked into
    pub destination: String,
}

/// Produces a project archive for a spec
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    async fn fetch(&self, spec: &ProjectSpec) -> Result<FetchedArchive, FetchError>;
}

/// Fetches archives over HTTP
pub struct HttpFetcher {
    client: reqwest::Client,
    service: ServiceConfig,
}

impl HttpFetcher {
    /// Create a fetcher for the configured service
    pub fn new(service: ServiceConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("spring-init/", env!("CARGO_PKG_VERSION")))
            .timeout(service.timeout())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

        Ok(Self { client, service })
    }

    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }
}

#[async_trait]
impl ArchiveFetcher for HttpFetcher {
    async fn fetch(&self, spec: &ProjectSpec) -> Result<FetchedArchive, FetchError> {
        let request = GenerationRequest::new(&self.service, spec);
        let url = request.url()?;
        let url_text = url.to_string();

        tracing::info!(
            "Requesting project '{}' with dependencies [{}]",
            spec.project_name,
            spec.dependencies.join(",")
        );
        tracing::debug!("GET {}", url_text);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url_text.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Generation service answered HTTP {} for {}", status, url_text);
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url_text,
            });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Body {
            url: url_text.clone(),
            source,
        })?;

        tracing::info!("Downloaded archive ({} bytes)", bytes.len());

        Ok(FetchedArchive {
            bytes: bytes.to_vec(),
            destination: spec.destination_folder(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the request line
    async fn serve_once(status_line: &'static str, body: Vec<u8>) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let header = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/zip\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(header.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.unwrap();

            request.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{addr}/starter.zip"), handle)
    }

    fn spec() -> ProjectSpec {
        ProjectSpec {
            group_id: "com.example".to_string(),
            artifact_id: "demo".to_string(),
            project_name: "demo".to_string(),
            dependencies: vec!["web".to_string(), "jpa".to_string()],
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_destination() {
        let (base_url, server) = serve_once("200 OK", b"PK-archive".to_vec()).await;
        let fetcher = HttpFetcher::new(ServiceConfig {
            base_url,
            ..ServiceConfig::default()
        })
        .unwrap();

        let archive = fetcher.fetch(&spec()).await.unwrap();
        assert_eq!(archive.bytes, b"PK-archive");
        assert_eq!(archive.destination, "demo");

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /starter.zip?"));
        assert!(request_line.contains("name=demo"));
        assert!(request_line.contains("type=gradle-project"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let (base_url, server) = serve_once("400 Bad Request", b"{\"error\":\"bad\"}".to_vec()).await;
        let fetcher = HttpFetcher::new(ServiceConfig {
            base_url,
            ..ServiceConfig::default()
        })
        .unwrap();

        let err = fetcher.fetch(&spec()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 400, .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new(ServiceConfig {
            base_url: format!("http://{addr}/starter.zip"),
            timeout_secs: 5,
            ..ServiceConfig::default()
        })
        .unwrap();

        let err = fetcher.fetch(&spec()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
