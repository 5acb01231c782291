//! Pluggable byte sources for collections and partials.
//!
//! `DirSource` reads a site tree on disk, `HttpSource` issues GET requests
//! against a deployed site, and `MemorySource` serves fixtures.

use async_trait::async_trait;
use plat_core::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Async source of site files addressed by absolute site paths
/// (`/data/cities.json`).
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the raw bytes at `path`
    async fn fetch(&self, path: &str) -> Result<Vec<u8>>;

    /// Human-readable location for logs
    fn describe(&self) -> String;

    /// Fetch `path` as UTF-8 text
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let bytes = self.fetch(path).await?;
        String::from_utf8(bytes).map_err(|e| Error::Fetch {
            path: path.to_string(),
            reason: format!("invalid UTF-8: {}", e),
        })
    }
}

/// Reads files below a site root directory
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a site path below the root
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DataSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let file = self.resolve(path);
        tokio::fs::read(&file).await.map_err(|e| Error::Fetch {
            path: path.to_string(),
            reason: format!("{}: {}", file.display(), e),
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Issues HTTP GET requests below a base URL
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .map_err(|e| Error::Config(format!("invalid base URL {}: {}", base_url, e)))?;
        Ok(Self {
            base,
            client: reqwest::Client::new(),
        })
    }

    /// Full URL for a site path; keeps any path prefix of the base URL
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Fetch {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url_for(path)?;
        let fetch_err = |reason: String| Error::Fetch {
            path: path.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {} from {}", status, url)));
        }

        let body = response.bytes().await.map_err(|e| fetch_err(e.to_string()))?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// In-memory path → bytes map
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&mut self, path: &str, body: impl Into<Vec<u8>>) {
        self.files.insert(path.to_string(), body.into());
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| Error::Fetch {
            path: path.to_string(),
            reason: "not found".to_string(),
        })
    }

    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dir_source_reads_below_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/cities.json"), b"{}").unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.fetch("/data/cities.json").await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_dir_source_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path());
        let err = source.fetch("/data/builders.json").await.unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }

    #[test]
    fn test_http_source_keeps_base_prefix() {
        let source = HttpSource::new("https://example.github.io/homes").unwrap();
        let url = source.url_for("/data/cities.json").unwrap();
        assert_eq!(url.as_str(), "https://example.github.io/homes/data/cities.json");
    }

    #[test]
    fn test_http_source_rejects_bad_base() {
        assert!(matches!(HttpSource::new("not a url"), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_memory_source_text() {
        let source = MemorySource::new().with_file("/assets/partials/header.html", "<nav></nav>");
        assert_eq!(
            source.fetch_text("/assets/partials/header.html").await.unwrap(),
            "<nav></nav>"
        );
        assert!(source.fetch("/missing").await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_fetch_error() {
        let source = MemorySource::new().with_file("/bad", vec![0xff, 0xfe]);
        assert!(matches!(
            source.fetch_text("/bad").await,
            Err(Error::Fetch { .. })
        ));
    }
}
