//! RDS Data API statement executor.
//!
//! Provides the `RdsDataClient` struct that implements the `StatementExecutor`
//! trait on top of the `ExecuteStatement` call of `aws-sdk-rdsdata`.

use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, QueryResult, Row, StatementExecutor, StatementRequest, Value};
use crate::error::{MapperError, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_rdsdata::error::DisplayErrorContext;
use aws_sdk_rdsdata::operation::execute_statement::ExecuteStatementOutput;
use aws_sdk_rdsdata::types::{ArrayValue, Field};
use aws_sdk_rdsdata::Client;
use std::time::Instant;
use tracing::debug;

/// Statement executor backed by the AWS RDS Data API.
#[derive(Clone)]
pub struct RdsDataClient {
    client: Client,
}

impl RdsDataClient {
    /// Resolves the ambient AWS configuration for the configured region and
    /// builds a Data API client from it.
    ///
    /// Credential lookup follows the SDK default chain (environment, profile,
    /// container or instance role). Credentials are resolved once here, so a
    /// missing or broken chain is a configuration error rather than a failure
    /// of the first statement.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let resolved = config.resolve()?;

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(resolved.region.clone()))
            .load()
            .await;

        check_credentials(sdk_config.credentials_provider()).await?;

        debug!("Data API client ready for region {}", resolved.region);
        Ok(Self {
            client: Client::new(&sdk_config),
        })
    }
}

/// Resolves credentials from `provider`, mapping any failure to a configuration error.
async fn check_credentials(provider: Option<SharedCredentialsProvider>) -> Result<()> {
    let Some(provider) = provider else {
        return Err(MapperError::config("No AWS credentials provider configured"));
    };

    provider.provide_credentials().await.map_err(|e| {
        MapperError::config(format!(
            "Failed to resolve AWS credentials: {}",
            DisplayErrorContext(&e)
        ))
    })?;

    Ok(())
}

#[async_trait]
impl StatementExecutor for RdsDataClient {
    async fn execute_statement(&self, request: &StatementRequest) -> Result<QueryResult> {
        let start = Instant::now();

        let output = self
            .client
            .execute_statement()
            .sql(&request.sql)
            .database(&request.database)
            .resource_arn(&request.resource_arn)
            .secret_arn(&request.secret_arn)
            .include_result_metadata(request.include_result_metadata)
            .send()
            .await
            .map_err(|e| MapperError::execution(DisplayErrorContext(&e).to_string()))?;

        debug!("ExecuteStatement completed in {:?}", start.elapsed());
        Ok(convert_output(&output))
    }
}

/// Converts an `ExecuteStatement` response into a `QueryResult`.
fn convert_output(output: &ExecuteStatementOutput) -> QueryResult {
    let columns = output
        .column_metadata()
        .iter()
        .map(|meta| {
            ColumnInfo::new(
                meta.name().unwrap_or_default(),
                meta.type_name().unwrap_or_default(),
            )
        })
        .collect();

    let rows = output
        .records()
        .iter()
        .map(|record| record.iter().map(convert_field).collect::<Row>())
        .collect();

    QueryResult::with_data(columns, rows)
}

/// Converts a single Data API field into a `Value`.
fn convert_field(field: &Field) -> Value {
    match field {
        Field::StringValue(s) => Value::String(s.clone()),
        Field::LongValue(i) => Value::Int(*i),
        Field::BooleanValue(b) => Value::Bool(*b),
        Field::DoubleValue(f) => Value::Float(*f),
        Field::IsNull(_) => Value::Null,
        Field::BlobValue(blob) => Value::Bytes(blob.as_ref().to_vec()),
        Field::ArrayValue(array) => Value::Other(array_kind(array).to_string()),
        _ => Value::Other("unknown".to_string()),
    }
}

fn array_kind(array: &ArrayValue) -> &'static str {
    match array {
        ArrayValue::StringValues(_) => "text array",
        ArrayValue::LongValues(_) => "integer array",
        ArrayValue::BooleanValues(_) => "boolean array",
        ArrayValue::DoubleValues(_) => "float array",
        ArrayValue::ArrayValues(_) => "nested array",
        _ => "array",
    }
}
