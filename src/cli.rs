//! Command-line argument parsing for rds-data-mapper.

use clap::Parser;
use rds_data_mapper::config::{Config, ConnectionConfig};
use std::path::PathBuf;
use std::time::Duration;

/// How the mapped record is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rust debug representation.
    #[default]
    Debug,
    /// Pretty-printed JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid output format: {s}. Expected: debug or json"
            )),
        }
    }
}

/// Reads the first row of a table through the RDS Data API.
#[derive(Parser, Debug)]
#[command(name = "rds-data-mapper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Table to read; the database name is used as its schema (trusted input, not escaped)
    #[arg(value_name = "TABLE", default_value = "transaction")]
    pub table: String,

    /// Database name
    #[arg(short = 'd', long, value_name = "DATABASE")]
    pub database: Option<String>,

    /// ARN of the Aurora cluster
    #[arg(long, value_name = "ARN")]
    pub resource_arn: Option<String>,

    /// ARN of the secret holding the database credentials
    #[arg(long, value_name = "ARN")]
    pub secret_arn: Option<String>,

    /// AWS region of the cluster
    #[arg(short = 'r', long, value_name = "REGION")]
    pub region: Option<String>,

    /// Use named connection from config
    #[arg(short = 'c', long, value_name = "NAME")]
    pub connection: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH", env = "RDS_DATA_MAPPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format for the mapped record (debug or json)
    #[arg(long, value_name = "FORMAT", default_value = "debug")]
    pub format: String,

    /// Enable debug logging for this crate
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Converts CLI arguments to a ConnectionConfig.
    ///
    /// Only identifiers given on the command line are set.
    pub fn to_connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            database: self.database.clone(),
            resource_arn: self.resource_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            region: self.region.clone(),
        }
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Returns the named connection to use, if specified.
    pub fn connection_name(&self) -> Option<&str> {
        self.connection.as_deref()
    }

    /// Returns the caller-imposed deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Parses the output format from the --format argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.format.parse()
    }
}
