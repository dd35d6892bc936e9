use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::metadata::PackageMetadata;

pub const DEFAULT_MAX_REDIRECTS: usize = 5;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("failed to build HTTP client: {details}")]
    ClientBuild { details: String },

    #[error("request to {url} failed: {details}")]
    Request { url: String, details: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} responded with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to parse response from {url}: {details}")]
    Parse { url: String, details: String },
}

impl SourceError {
    pub fn request(url: &str, details: impl Into<String>) -> Self {
        Self::Request {
            url: url.to_string(),
            details: details.into(),
        }
    }

    pub fn parse(url: &str, details: impl Into<String>) -> Self {
        Self::Parse {
            url: url.to_string(),
            details: details.into(),
        }
    }

    fn from_reqwest(url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::request(url, error.to_string())
        }
    }
}

/// Remote capability the scanner needs: read a plugin's `package.json` and
/// check that a release archive exists.
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    /// Fetches and parses the metadata document at `url`.
    async fn fetch_metadata(&self, url: &str) -> Result<PackageMetadata, SourceError>;

    /// Issues a HEAD request and returns the final status after redirects.
    async fn probe_artifact(&self, url: &str) -> Result<u16, SourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: format!("plugup/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// [`ReleaseHost`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpReleaseHost {
    client: reqwest::Client,
}

impl HttpReleaseHost {
    /// Builds a client with finite timeouts and a bounded redirect policy.
    ///
    /// # Errors
    /// Returns an error when the underlying TLS backend cannot be initialized.
    pub fn new(options: &HttpOptions) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .user_agent(options.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(options.max_redirects))
            .build()
            .map_err(|e| SourceError::ClientBuild {
                details: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ReleaseHost for HttpReleaseHost {
    async fn fetch_metadata(&self, url: &str) -> Result<PackageMetadata, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(url, &e))?;

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::from_reqwest(url, &e))?;

        PackageMetadata::from_json(&body).map_err(|e| SourceError::parse(url, e.to_string()))
    }

    async fn probe_artifact(&self, url: &str) -> Result<u16, SourceError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(url, &e))?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    use super::*;

    /// Serves canned responses on a loopback port until the test ends.
    ///
    /// `/hops/N` redirects to `/hops/N-1` and answers 200 at zero.
    async fn serve() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(respond(stream));
            }
        });
        base
    }

    async fn respond(mut stream: TcpStream) {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let request = String::from_utf8_lossy(&request);
        let mut parts = request.split_whitespace();
        let method = parts.next().unwrap_or_default();
        let path = parts.next().unwrap_or_default();

        let (status, location, body) = match path {
            "/package.json" => ("200 OK", None, r#"{"name": "x", "version": "1.3.0"}"#),
            "/garbage" => ("200 OK", None, "404: Not Found"),
            _ => match path.strip_prefix("/hops/").and_then(|n| n.parse::<u32>().ok()) {
                Some(0) => ("200 OK", None, ""),
                Some(n) => ("302 Found", Some(format!("/hops/{}", n - 1)), ""),
                None => ("404 Not Found", None, "Not Found"),
            },
        };

        let mut response = format!(
            "HTTP/1.1 {status}\r\ncontent-length: {}\r\nconnection: close\r\n",
            body.len()
        );
        if let Some(location) = location {
            response.push_str(&format!("location: {location}\r\n"));
        }
        response.push_str("\r\n");
        if method != "HEAD" {
            response.push_str(body);
        }
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    }

    fn host() -> HttpReleaseHost {
        HttpReleaseHost::new(&HttpOptions::default()).expect("client should build")
    }

    #[tokio::test]
    async fn fetch_metadata_reads_version() {
        let base = serve().await;

        let metadata = host()
            .fetch_metadata(&format!("{base}/package.json"))
            .await
            .expect("metadata should load");

        assert_eq!(metadata.version(), Some("1.3.0"));
    }

    #[tokio::test]
    async fn fetch_metadata_maps_error_status() {
        let base = serve().await;
        let url = format!("{base}/missing");

        let result = host().fetch_metadata(&url).await;

        assert_eq!(result, Err(SourceError::HttpStatus { url, status: 404 }));
    }

    #[tokio::test]
    async fn fetch_metadata_rejects_non_json_body() {
        let base = serve().await;

        let result = host().fetch_metadata(&format!("{base}/garbage")).await;

        assert!(matches!(result, Err(SourceError::Parse { .. })));
    }

    #[tokio::test]
    async fn probe_artifact_follows_up_to_five_redirects() {
        let base = serve().await;
        let host = host();

        assert_eq!(host.probe_artifact(&format!("{base}/hops/0")).await, Ok(200));
        assert_eq!(host.probe_artifact(&format!("{base}/hops/5")).await, Ok(200));
    }

    #[tokio::test]
    async fn probe_artifact_fails_past_redirect_limit() {
        let base = serve().await;

        let result = host().probe_artifact(&format!("{base}/hops/6")).await;

        assert!(matches!(result, Err(SourceError::Request { .. })));
    }

    #[tokio::test]
    async fn probe_artifact_returns_final_non_ok_status() {
        let base = serve().await;

        let result = host()
            .probe_artifact(&format!("{base}/releases/download/v1.0.0/x.zip"))
            .await;

        assert_eq!(result, Ok(404));
    }

    #[test]
    fn default_options_are_finite_and_bounded() {
        let options = HttpOptions::default();

        assert_eq!(options.max_redirects, 5);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.connect_timeout, Duration::from_secs(5));
        assert!(options.user_agent.starts_with("plugup/"));
    }

    #[test]
    fn http_host_builds_with_default_options() {
        assert!(HttpReleaseHost::new(&HttpOptions::default()).is_ok());
    }

    #[test]
    fn error_display_includes_url_and_reason() {
        let status = SourceError::HttpStatus {
            url: "https://github.com/utkwdn/x/releases/download/v1.0.0/x.zip".to_string(),
            status: 404,
        };
        let parse = SourceError::parse("https://example.test/package.json", "expected value");

        assert_eq!(
            status.to_string(),
            "https://github.com/utkwdn/x/releases/download/v1.0.0/x.zip responded with HTTP 404"
        );
        assert_eq!(
            parse.to_string(),
            "failed to parse response from https://example.test/package.json: expected value"
        );
    }
}
