//! Execution of the fixed first-row query.

use std::time::Instant;

use crate::config::ResolvedConnection;
use crate::db::{QueryResult, StatementExecutor, StatementRequest};
use crate::error::Result;
use tracing::{debug, warn};

/// Builds the query that fetches the first row of `schema.table`.
///
/// Both names are inserted verbatim, without quoting or escaping. Callers
/// must only pass trusted identifiers.
pub fn select_first_sql(schema: &str, table: &str) -> String {
    format!("SELECT * FROM {schema}.{table} LIMIT 1")
}

/// Runs the first-row query against one Data API connection.
pub struct QueryExecutor<'a> {
    executor: &'a dyn StatementExecutor,
    connection: &'a ResolvedConnection,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor.
    pub fn new(executor: &'a dyn StatementExecutor, connection: &'a ResolvedConnection) -> Self {
        Self {
            executor,
            connection,
        }
    }

    /// Builds the request for the first row of `table`, qualified with the database name.
    pub fn first_row_request(&self, table: &str) -> StatementRequest {
        StatementRequest {
            sql: select_first_sql(&self.connection.database, table),
            database: self.connection.database.clone(),
            resource_arn: self.connection.resource_arn.clone(),
            secret_arn: self.connection.secret_arn.clone(),
            include_result_metadata: true,
        }
    }

    /// Fetches at most one row of `table`. Service errors are returned as they are.
    pub async fn fetch_first(&self, table: &str) -> Result<QueryResult> {
        let request = self.first_row_request(table);
        debug!("Generated query: {}", request.sql);

        let start = Instant::now();
        let result = self.executor.execute_statement(&request).await;
        let execution_time = start.elapsed();

        match result {
            Ok(result) => {
                debug!(
                    "Query returned {} row(s) in {:?}",
                    result.rows.len(),
                    execution_time
                );
                Ok(result)
            }
            Err(e) => {
                warn!("Query on table '{}' failed: {}", table, e);
                Err(e)
            }
        }
    }
}
