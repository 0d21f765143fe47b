//! Remote and local resource access shared by the file-based extractors

use eyre::{Context, Result, eyre};
use std::path::PathBuf;
use url::Url;

/// Where a file-like resource lives
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Fetched over HTTP(S)
    Remote(Url),
    /// Read from the local file system
    Local(PathBuf),
}

impl Location {
    /// Resolve a resource reference.
    ///
    /// `s3://bucket/key` becomes the bucket's public HTTPS endpoint,
    /// `http(s)://` URLs are used as-is, anything else is a local path.
    pub fn parse(reference: &str) -> Result<Self> {
        if let Some(rest) = reference.strip_prefix("s3://") {
            let (bucket, key) = rest
                .split_once('/')
                .ok_or_else(|| eyre!("S3 reference has no object key: {}", reference))?;
            let url = format!("https://{}.s3.amazonaws.com/{}", bucket, key);
            return Ok(Self::Remote(
                Url::parse(&url).with_context(|| format!("Invalid S3 reference: {}", reference))?,
            ));
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Ok(Self::Remote(
                Url::parse(reference).with_context(|| format!("Invalid URL: {}", reference))?,
            ));
        }
        Ok(Self::Local(PathBuf::from(reference)))
    }

    /// Lowercase file extension of the resource, if any
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            Self::Remote(url) => url.path_segments()?.next_back()?.to_string(),
            Self::Local(path) => path.file_name()?.to_string_lossy().into_owned(),
        };
        let (_, ext) = name.rsplit_once('.')?;
        Some(ext.to_lowercase())
    }

    /// Read the whole resource as bytes
    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::Local(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read file: {}", path.display())),
            Self::Remote(url) => {
                log::debug!("Fetching {}", url);
                let response = reqwest::get(url.clone())
                    .await
                    .map_err(|e| eyre!("Failed to send request: {}", e))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    eyre::bail!("Failed to fetch {} ({}): {}", url, status, body);
                }

                let bytes = response
                    .bytes()
                    .await
                    .with_context(|| format!("Failed to read response body from {}", url))?;
                Ok(bytes.to_vec())
            }
        }
    }

    /// Read the whole resource as UTF-8 text
    pub async fn read_text(&self) -> Result<String> {
        let bytes = self.read_bytes().await?;
        String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", self))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{}", url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
