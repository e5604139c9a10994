//! Error types for rds-data-mapper.
//!
//! Defines the main error enum used throughout the crate.

use std::time::Duration;
use thiserror::Error;

/// Main error type for rds-data-mapper operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapperError {
    /// Configuration errors (blank identifiers, unresolvable credentials, bad config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote statement execution errors (network, auth, SQL syntax, permissions).
    #[error("Execution error: {0}")]
    Execution(String),

    /// The destination record or the result set has an unusable shape.
    #[error("Shape error: {0}")]
    Shape(String),

    /// A column value cannot be stored in the field declared for it.
    #[error("Conversion error: column '{column}' holds {found}, field expects {expected}")]
    Conversion {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// A caller-imposed deadline elapsed before the statement completed.
    #[error("Timeout: statement did not complete within {0:?}")]
    Timeout(Duration),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MapperError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a shape error with the given message.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Creates a conversion error for the named column.
    pub fn conversion(
        column: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            column: column.into(),
            expected,
            found: found.into(),
        }
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Execution(_) => "Execution Error",
            Self::Shape(_) => "Shape Error",
            Self::Conversion { .. } => "Conversion Error",
            Self::Timeout(_) => "Timeout",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using MapperError.
pub type Result<T> = std::result::Result<T, MapperError>;
