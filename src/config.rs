//! Configuration management for rds-data-mapper.
//!
//! Handles loading configuration from TOML files and environment variables,
//! with support for named Data API connections.

use crate::error::{MapperError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Named Data API connections.
    #[serde(default)]
    pub connections: HashMap<String, ConnectionConfig>,
}

/// Identifiers binding a client to one Data API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Database name. Also used as the schema qualifier of generated queries.
    pub database: Option<String>,

    /// ARN of the Aurora cluster.
    pub resource_arn: Option<String>,

    /// ARN of the Secrets Manager secret holding the credentials.
    pub secret_arn: Option<String>,

    /// AWS region of the cluster.
    pub region: Option<String>,
}

/// Fully specified connection identifiers, produced by [`ConnectionConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConnection {
    pub database: String,
    pub resource_arn: String,
    pub secret_arn: String,
    pub region: String,
}

impl ConnectionConfig {
    /// Creates a config with all four identifiers set.
    pub fn new(
        database: impl Into<String>,
        resource_arn: impl Into<String>,
        secret_arn: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            database: Some(database.into()),
            resource_arn: Some(resource_arn.into()),
            secret_arn: Some(secret_arn.into()),
            region: Some(region.into()),
        }
    }

    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &ConnectionConfig) {
        if other.database.is_some() {
            self.database = other.database.clone();
        }
        if other.resource_arn.is_some() {
            self.resource_arn = other.resource_arn.clone();
        }
        if other.secret_arn.is_some() {
            self.secret_arn = other.secret_arn.clone();
        }
        if other.region.is_some() {
            self.region = other.region.clone();
        }
    }

    /// Applies environment variables (RDS_DATABASE, RDS_RESOURCE_ARN, etc.) as defaults.
    pub fn apply_env_defaults(&mut self) {
        if self.database.is_none() {
            self.database = std::env::var("RDS_DATABASE").ok();
        }
        if self.resource_arn.is_none() {
            self.resource_arn = std::env::var("RDS_RESOURCE_ARN").ok();
        }
        if self.secret_arn.is_none() {
            self.secret_arn = std::env::var("RDS_SECRET_ARN").ok();
        }
        if self.region.is_none() {
            self.region = std::env::var("AWS_REGION")
                .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
                .ok();
        }
    }

    /// Checks that every identifier is present and non-blank.
    pub fn resolve(&self) -> Result<ResolvedConnection> {
        Ok(ResolvedConnection {
            database: required(&self.database, "database name")?,
            resource_arn: required(&self.resource_arn, "resource ARN")?,
            secret_arn: required(&self.secret_arn, "secret ARN")?,
            region: required(&self.region, "region")?,
        })
    }

    /// Returns a display-safe string (no secret ARN) for log output.
    pub fn display_string(&self) -> String {
        let database = self.database.as_deref().unwrap_or("unknown");
        let region = self.region.as_deref().unwrap_or("default region");
        let cluster = self
            .resource_arn
            .as_deref()
            .and_then(|arn| arn.rsplit(':').next())
            .unwrap_or("unknown cluster");
        format!("{database} @ {cluster} ({region})")
    }
}

fn required(value: &Option<String>, what: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(MapperError::config(format!("{what} is required"))),
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rds-data-mapper")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields the default config.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| MapperError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            MapperError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Gets a named connection, or the default connection if name is None.
    pub fn get_connection(&self, name: Option<&str>) -> Option<&ConnectionConfig> {
        let key = name.unwrap_or("default");
        self.connections.get(key)
    }
}
