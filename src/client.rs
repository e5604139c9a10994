//! High-level Data API client.
//!
//! Binds one Data API endpoint (database, cluster, secret, region) and maps
//! the first row of a table onto a [`Record`].

use crate::config::{ConnectionConfig, ResolvedConnection};
use crate::db::{self, StatementExecutor};
use crate::error::Result;
use crate::mapper::{apply_first_row, FieldMap, Record};
use crate::query::QueryExecutor;
use tracing::info;

/// Client bound to a single Data API endpoint for its lifetime.
///
/// Read-only after construction, so it can be reused across sequential calls.
pub struct DataApiClient {
    executor: Box<dyn StatementExecutor>,
    connection: ResolvedConnection,
}

impl DataApiClient {
    /// Connects to the Data API using the ambient AWS configuration for `region`.
    ///
    /// Blank identifiers, or AWS credentials that cannot be resolved, are
    /// returned as configuration errors.
    pub async fn new(
        database: impl Into<String>,
        resource_arn: impl Into<String>,
        secret_arn: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self> {
        let config = ConnectionConfig::new(database, resource_arn, secret_arn, region);
        Self::from_config(&config).await
    }

    /// Connects using a (possibly file or environment sourced) connection config.
    pub async fn from_config(config: &ConnectionConfig) -> Result<Self> {
        let connection = config.resolve()?;
        let executor = db::connect(config).await?;
        info!("Connected to {}", config.display_string());

        Ok(Self {
            executor,
            connection,
        })
    }

    /// Creates a client that submits statements through `executor`.
    pub fn with_executor(
        executor: Box<dyn StatementExecutor>,
        config: &ConnectionConfig,
    ) -> Result<Self> {
        Ok(Self {
            executor,
            connection: config.resolve()?,
        })
    }

    /// Reads the first row of `<database>.<table>` into `dest`.
    ///
    /// The table name is inserted into the SQL text unescaped and must come
    /// from a trusted source. If the table is empty `dest` is left unchanged.
    /// On any error `dest` is left unchanged. A record with duplicate column
    /// declarations fails before any statement is sent.
    pub async fn select_first<R: Record>(&self, dest: &mut R, table: &str) -> Result<()> {
        let field_map = FieldMap::for_record::<R>()?;

        let result = QueryExecutor::new(self.executor.as_ref(), &self.connection)
            .fetch_first(table)
            .await?;

        apply_first_row(dest, &field_map, &result)
    }
}
