//! Configuration document transport.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::error::FetchError;

/// Raw response for a fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves the configuration document from somewhere.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the document named by `source`.
    ///
    /// A response with a non-2xx status is still `Ok`; the caller decides.
    async fn fetch(&self, source: &str) -> Result<FetchResponse, FetchError>;
}

/// Resolve a source string to a local path.
///
/// Accepts bare paths and `file://` URLs. Other schemes are rejected.
pub fn resolve_source(source: &str) -> Result<PathBuf, FetchError> {
    match Url::parse(source) {
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map_err(|()| FetchError::InvalidSource(source.to_string())),
        // Windows drive letters parse as a one-letter scheme.
        Ok(url) if url.scheme().len() == 1 => Ok(PathBuf::from(source)),
        Ok(url) => Err(FetchError::UnsupportedScheme(url.scheme().to_string())),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(PathBuf::from(source)),
        Err(e) => Err(e.into()),
    }
}

/// Reads the document from the local filesystem.
///
/// A missing file is reported as status 404, like a web server would.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFetcher;

#[async_trait]
impl DocumentFetcher for FileFetcher {
    async fn fetch(&self, source: &str) -> Result<FetchResponse, FetchError> {
        let path = resolve_source(source)?;
        debug!("Reading configuration from {}", path.display());
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse {
                status: 404,
                body: String::new(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(resolve_source("config.json").unwrap(), PathBuf::from("config.json"));
        assert_eq!(
            resolve_source("site/config.json").unwrap(),
            PathBuf::from("site/config.json")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_file_url() {
        assert_eq!(
            resolve_source("file:///etc/contact/config.json").unwrap(),
            PathBuf::from("/etc/contact/config.json")
        );
        assert_eq!(
            resolve_source("/etc/contact/config.json").unwrap(),
            PathBuf::from("/etc/contact/config.json")
        );
    }

    #[test]
    fn test_resolve_rejects_remote_scheme() {
        let err = resolve_source("https://example.com/config.json").unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme(ref s) if s == "https"));
    }

    #[test]
    fn test_status_range() {
        assert!(FetchResponse::ok("").is_success());
        assert!(!FetchResponse { status: 404, body: String::new() }.is_success());
        assert!(!FetchResponse { status: 301, body: String::new() }.is_success());
    }

    #[tokio::test]
    async fn test_file_fetcher_reads_and_reports_missing() {
        let path = std::env::temp_dir().join(format!(
            "contact-hub-fetch-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{}").unwrap();
        let source = path.to_string_lossy().to_string();

        let response = FileFetcher.fetch(&source).await.unwrap();
        assert_eq!(response, FetchResponse::ok("{}"));

        std::fs::remove_file(&path).unwrap();
        let response = FileFetcher.fetch(&source).await.unwrap();
        assert_eq!(response.status, 404);
    }
}
