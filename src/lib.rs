//! rds-data-mapper - Maps the first row of an RDS Data API query onto a typed record.
//!
//! This library exposes the core modules for use by the binary and integration tests.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod query;

pub use client::DataApiClient;
pub use error::{MapperError, Result};
pub use mapper::Record;
