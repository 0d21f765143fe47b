//! Process settings read from the environment
//!
//! Expected environment variables (all optional until the entity that
//! needs them runs):
//! - SOURCE_CREDS: credentials file of the source database (default `db_creds.yaml`)
//! - TARGET_CREDS: credentials file of the destination database (default `local_creds.yaml`)
//! - USERS_TABLE / ORDERS_TABLE: source table names
//! - CARD_DETAILS_URL: multi-page card details document
//! - PRODUCTS_URL / DATE_DETAILS_URL: object storage files
//! - STORES_API_URL / STORES_API_KEY: stores REST API
//! - STORES_COUNT_PATH / STORES_RECORD_PATH: API paths, `{index}` is substituted
//! - DROP_BIRTH_AFTER_JOIN: drop users born after they joined (default false)

use eyre::{Context, Result, eyre};
use std::path::PathBuf;
use url::Url;

/// Settings shared by all entity pipelines
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source_creds: PathBuf,
    pub target_creds: PathBuf,
    pub users_table: String,
    pub orders_table: String,
    pub card_details_url: Option<String>,
    pub products_url: Option<String>,
    pub date_details_url: Option<String>,
    pub stores_api: Option<StoresApiSettings>,
    pub drop_birth_after_join: bool,
}

/// Location and key of the stores REST API
#[derive(Debug, Clone, PartialEq)]
pub struct StoresApiSettings {
    pub base_url: Url,
    pub api_key: String,
    pub count_path: String,
    pub record_path: String,
}

impl StoresApiSettings {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            count_path: "number_stores".to_string(),
            record_path: "store_details/{index}".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_creds: PathBuf::from("db_creds.yaml"),
            target_creds: PathBuf::from("local_creds.yaml"),
            users_table: "legacy_users".to_string(),
            orders_table: "orders_table".to_string(),
            card_details_url: None,
            products_url: None,
            date_details_url: None,
            stores_api: None,
            drop_birth_after_join: false,
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Settings::default();

        let stores_api = match std::env::var("STORES_API_URL") {
            Ok(url_str) => {
                let base_url = Url::parse(&url_str)
                    .with_context(|| format!("Invalid STORES_API_URL: {}", url_str))?;
                let api_key = std::env::var("STORES_API_KEY")
                    .context("STORES_API_KEY environment variable not set")?;
                let mut api = StoresApiSettings::new(base_url, api_key);
                if let Ok(path) = std::env::var("STORES_COUNT_PATH") {
                    api.count_path = path;
                }
                if let Ok(path) = std::env::var("STORES_RECORD_PATH") {
                    api.record_path = path;
                }
                Some(api)
            }
            Err(_) => None,
        };

        let drop_birth_after_join = match std::env::var("DROP_BIRTH_AFTER_JOIN") {
            Ok(value) => parse_flag(&value)
                .ok_or_else(|| eyre!("Invalid DROP_BIRTH_AFTER_JOIN: {}", value))?,
            Err(_) => defaults.drop_birth_after_join,
        };

        Ok(Self {
            source_creds: env_or("SOURCE_CREDS", defaults.source_creds.to_string_lossy()).into(),
            target_creds: env_or("TARGET_CREDS", defaults.target_creds.to_string_lossy()).into(),
            users_table: env_or("USERS_TABLE", &defaults.users_table),
            orders_table: env_or("ORDERS_TABLE", &defaults.orders_table),
            card_details_url: std::env::var("CARD_DETAILS_URL").ok(),
            products_url: std::env::var("PRODUCTS_URL").ok(),
            date_details_url: std::env::var("DATE_DETAILS_URL").ok(),
            stores_api,
            drop_birth_after_join,
        })
    }

    /// A setting that the given pipeline cannot run without
    pub fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
        value
            .as_deref()
            .ok_or_else(|| eyre!("{} environment variable not set", name))
    }
}

fn env_or(key: &str, default: impl AsRef<str>) -> String {
    std::env::var(key).unwrap_or_else(|_| default.as_ref().to_string())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "SOURCE_CREDS",
        "TARGET_CREDS",
        "USERS_TABLE",
        "ORDERS_TABLE",
        "CARD_DETAILS_URL",
        "PRODUCTS_URL",
        "DATE_DETAILS_URL",
        "STORES_API_URL",
        "STORES_API_KEY",
        "STORES_COUNT_PATH",
        "STORES_RECORD_PATH",
        "DROP_BIRTH_AFTER_JOIN",
    ];

    fn clear_env() {
        for key in KEYS {
            // SAFETY: tests touching the environment are serialized
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.drop_birth_after_join);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        unsafe {
            std::env::set_var("STORES_API_URL", "https://api.example.com/prod/");
            std::env::set_var("STORES_API_KEY", "secret");
            std::env::set_var("PRODUCTS_URL", "s3://data-handling-public/products.csv");
            std::env::set_var("DROP_BIRTH_AFTER_JOIN", "true");
        }

        let settings = Settings::from_env().unwrap();
        let api = settings.stores_api.unwrap();
        assert_eq!(api.base_url.as_str(), "https://api.example.com/prod/");
        assert_eq!(api.api_key, "secret");
        assert_eq!(api.count_path, "number_stores");
        assert_eq!(
            settings.products_url.as_deref(),
            Some("s3://data-handling-public/products.csv")
        );
        assert!(settings.drop_birth_after_join);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_api_url_without_key() {
        clear_env();
        unsafe { std::env::set_var("STORES_API_URL", "https://api.example.com/prod/") };
        let result = Settings::from_env();
        assert!(result.unwrap_err().to_string().contains("STORES_API_KEY"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_flag() {
        clear_env();
        unsafe { std::env::set_var("DROP_BIRTH_AFTER_JOIN", "maybe") };
        assert!(Settings::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_require() {
        let missing: Option<String> = None;
        assert!(Settings::require(&missing, "PRODUCTS_URL").is_err());
        let present = Some("file.csv".to_string());
        assert_eq!(Settings::require(&present, "PRODUCTS_URL").unwrap(), "file.csv");
    }
}
