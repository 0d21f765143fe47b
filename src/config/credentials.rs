//! Database credentials file
//!
//! Credentials are stored as a flat YAML document:
//! ```yaml
//! RDS_HOST: data-handling.example.com
//! RDS_PASSWORD: secret
//! RDS_USER: analyst
//! RDS_DATABASE: sales_data.db
//! RDS_PORT: 5432
//! ```
//!
//! Only `RDS_DATABASE` is required. The relational store is SQLite, so
//! `RDS_DATABASE` is the database file path; host, port and user only
//! describe the connection in logs.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Connection parameters read from a credentials file
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DbCredentials {
    #[serde(rename = "RDS_HOST", default)]
    pub host: Option<String>,

    #[serde(rename = "RDS_PASSWORD", default)]
    pub password: Option<String>,

    #[serde(rename = "RDS_USER", default)]
    pub user: Option<String>,

    #[serde(rename = "RDS_DATABASE")]
    pub database: String,

    #[serde(rename = "RDS_PORT", default)]
    pub port: Option<u16>,
}

impl DbCredentials {
    /// Credentials for a database file with no descriptive connection fields
    pub fn for_database(database: impl Into<String>) -> Self {
        Self {
            host: None,
            password: None,
            user: None,
            database: database.into(),
            port: None,
        }
    }

    /// Read credentials from a YAML file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file: {}", path.display()))?;
        let creds: DbCredentials = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse credentials file: {}", path.display()))?;
        Ok(creds)
    }
}

impl fmt::Display for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = &self.user {
            write!(f, "{}@", user)?;
        }
        if let Some(host) = &self.host {
            write!(f, "{}", host)?;
            if let Some(port) = self.port {
                write!(f, ":{}", port)?;
            }
            write!(f, "/")?;
        }
        write!(f, "{}", self.database)
    }
}

// Never print the password
impl fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbCredentials")
            .field("host", &self.host)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("user", &self.user)
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_credentials() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "RDS_HOST: db.example.com\nRDS_PASSWORD: hunter2\nRDS_USER: analyst\nRDS_DATABASE: sales.db\nRDS_PORT: 5432"
        )
        .unwrap();

        let creds = DbCredentials::read(file.path()).unwrap();
        assert_eq!(creds.host.as_deref(), Some("db.example.com"));
        assert_eq!(creds.user.as_deref(), Some("analyst"));
        assert_eq!(creds.database, "sales.db");
        assert_eq!(creds.port, Some(5432));
        assert_eq!(creds.to_string(), "analyst@db.example.com:5432/sales.db");
    }

    #[test]
    fn test_password_is_hidden() {
        let mut creds = DbCredentials::for_database("sales.db");
        creds.password = Some("hunter2".to_string());
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(!creds.to_string().contains("hunter2"));
    }

    #[test]
    fn test_missing_database_key() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "RDS_HOST: db.example.com").unwrap();

        let result = DbCredentials::read(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = DbCredentials::read("/nonexistent/creds.yaml");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read credentials file")
        );
    }
}
