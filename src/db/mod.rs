//! Statement execution layer.
//!
//! Provides a trait-based boundary around the external SQL execution
//! service, so the RDS Data API client and in-memory executors can be used
//! interchangeably.

mod mock;
mod rds;
mod types;

pub use mock::{FailingExecutor, MockExecutor};
pub use rds::RdsDataClient;
pub use types::{ColumnInfo, QueryResult, Row, StatementRequest, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Creates the Data API executor for the given configuration.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn StatementExecutor>> {
    let client = RdsDataClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface of the SQL execution service.
///
/// Implementations submit one statement and return its column metadata and
/// records, or an execution error carrying the service's message.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Executes a single SQL statement.
    async fn execute_statement(&self, request: &StatementRequest) -> Result<QueryResult>;
}
