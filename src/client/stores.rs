//! Stores REST API client
//!
//! The API exposes two endpoints, both requiring an `x-api-key` header:
//! - a count endpoint returning `{"number_stores": N}`
//! - a per-record endpoint taking the store index as a path suffix

use crate::config::StoresApiSettings;
use eyre::{Context, Result, eyre};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

#[derive(Debug, Deserialize)]
struct StoreCount {
    number_stores: usize,
}

/// Client for the stores REST API.
///
/// # Example
/// ```no_run
/// use sales_data_etl::client::StoresApi;
/// use sales_data_etl::config::StoresApiSettings;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("https://api.example.com/prod/")?;
/// let api = StoresApi::try_new(StoresApiSettings::new(url, "key"))?;
///
/// let count = api.number_of_stores().await?;
/// let first = api.store(0).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct StoresApi {
    client: Client,
    url: Url,
    count_path: String,
    record_path: String,
}

impl StoresApi {
    /// Create a client with the API key installed as a default header
    pub fn try_new(settings: StoresApiSettings) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut key: reqwest::header::HeaderValue = settings
            .api_key
            .parse()
            .context("STORES_API_KEY is not a valid header value")?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        let client = Client::builder().default_headers(headers).build()?;

        // Url::join drops the last path segment unless the base ends in '/'
        let mut url = settings.base_url;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            client,
            url,
            count_path: settings.count_path,
            record_path: settings.record_path,
        })
    }

    /// Get the base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resolve an API path against the base URL
    fn endpoint(&self, path: &str) -> Result<Url> {
        // Strip leading slash from path if present, to keep the base path
        let path = path.strip_prefix('/').unwrap_or(path);
        self.url
            .join(path)
            .with_context(|| format!("Invalid API path: {}", path))
    }

    /// Send a GET request and decode the JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        log::trace!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            eyre::bail!("Request to {} failed ({}): {}", url, status, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }

    /// Fetch the number of stores from the count endpoint
    pub async fn number_of_stores(&self) -> Result<usize> {
        let count: StoreCount = self
            .get_json(&self.count_path)
            .await
            .with_context(|| "Failed to fetch number of stores")?;
        Ok(count.number_stores)
    }

    /// Fetch one store record by index
    pub async fn store(&self, index: usize) -> Result<Map<String, Value>> {
        let path = self.record_path.replace("{index}", &index.to_string());
        let value: Value = self
            .get_json(&path)
            .await
            .with_context(|| format!("Failed to fetch store {}", index))?;
        match value {
            Value::Object(record) => Ok(record),
            other => Err(eyre!("Store {} is not a JSON object: {}", index, other)),
        }
    }
}

impl std::fmt::Display for StoresApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
